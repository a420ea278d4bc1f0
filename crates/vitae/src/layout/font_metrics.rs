//! Static character-width tables for the faces the renderers draw with.
//!
//! Widths are in em units (relative to font size), so one table serves every
//! size a face is drawn at. The three Times tables carry the Adobe core-font
//! AFM advance widths (scaled from 1000 units/em), which is exactly what a
//! PDF viewer uses for the built-in Type1 faces, so wrap decisions here match
//! the produced document. The Inter table is measured from the browser face
//! and backs the on-screen preview; the semibold weight reuses it as a close
//! approximation.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32. Non-ASCII falls back to an average width.

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The faces used across the two renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Preview face — humanist sans-serif, all weights.
    Inter,
    /// PDF body face.
    TimesRoman,
    /// PDF headings, names, and entry titles.
    TimesBold,
    /// PDF date rows and technology lines.
    TimesItalic,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units, covering
/// 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    pub font: Font,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Greedy word-wrap at `max_width_em`, returning the wrapped lines.
    ///
    /// Words never split: a word wider than the whole line still occupies a
    /// single (overflowing) line by itself. Whitespace-only input yields no
    /// lines at all.
    pub fn wrap(&self, s: &str, max_width_em: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_width = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + self.space_width + word_width > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Number of printed lines `s` occupies when wrapped at `max_width_em`.
    pub fn line_count(&self, s: &str, max_width_em: f32) -> usize {
        self.wrap(s, max_width_em).len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Inter — measured from the browser face backing the preview.
#[rustfmt::skip]
static INTER_TABLE: FontMetricTable = FontMetricTable {
    font: Font::Inter,
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// Times Roman — Adobe core-font AFM advances / 1000.
#[rustfmt::skip]
static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    font: Font::TimesRoman,
    widths: [
        // sp      !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.50,
    space_width: 0.250,
};

/// Times Bold — Adobe core-font AFM advances / 1000.
#[rustfmt::skip]
static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    font: Font::TimesBold,
    widths: [
        // sp      !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.555, 0.500, 0.500, 1.000, 0.833, 0.278, 0.333, 0.333, 0.500, 0.570, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.570, 0.570, 0.570, 0.500, 0.930,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.778, 0.389, 0.500, 0.778, 0.667, 0.944,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.611, 0.778, 0.722, 0.556, 0.667, 0.722, 0.722, 1.000, 0.722, 0.722, 0.667,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.581, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.556, 0.444, 0.556, 0.444, 0.333, 0.500, 0.556, 0.278, 0.333, 0.556, 0.278, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.500, 0.556, 0.556, 0.444, 0.389, 0.333, 0.556, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.394, 0.220, 0.394, 0.520,
    ],
    average_char_width: 0.52,
    space_width: 0.250,
};

/// Times Italic — Adobe core-font AFM advances / 1000.
#[rustfmt::skip]
static TIMES_ITALIC_TABLE: FontMetricTable = FontMetricTable {
    font: Font::TimesItalic,
    widths: [
        // sp      !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.420, 0.500, 0.500, 0.833, 0.778, 0.214, 0.333, 0.333, 0.500, 0.675, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.675, 0.675, 0.675, 0.500, 0.920,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.611, 0.611, 0.667, 0.722, 0.611, 0.611, 0.722, 0.722, 0.333, 0.444, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.667, 0.722, 0.611, 0.722, 0.611, 0.500, 0.556, 0.722, 0.611, 0.833, 0.611, 0.556, 0.556,
        // [      \      ]      ^      _      `
        0.389, 0.278, 0.389, 0.422, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.500, 0.444, 0.500, 0.444, 0.278, 0.500, 0.500, 0.278, 0.278, 0.444, 0.278, 0.722,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.389, 0.389, 0.278, 0.500, 0.444, 0.667, 0.444, 0.444, 0.389,
        // {      |      }      ~
        0.400, 0.275, 0.400, 0.541,
    ],
    average_char_width: 0.48,
    space_width: 0.250,
};

/// Returns the static metric table for a face.
pub fn get_metrics(font: Font) -> &'static FontMetricTable {
    match font {
        Font::Inter => &INTER_TABLE,
        Font::TimesRoman => &TIMES_ROMAN_TABLE,
        Font::TimesBold => &TIMES_BOLD_TABLE,
        Font::TimesItalic => &TIMES_ITALIC_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(Font::TimesRoman);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(Font::TimesRoman);
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.250).abs() < 1e-4,
            "space width should be 0.250, got {width}"
        );
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(Font::TimesRoman);
        // "Rust" = R(0.667) + u(0.500) + s(0.389) + t(0.278) = 1.834
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 1.834).abs() < 1e-3,
            "Rust width should be ~1.834, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(Font::TimesRoman);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_bold_measures_wider_than_regular() {
        let text = "Engineering Manager";
        let regular = get_metrics(Font::TimesRoman).measure_str(text);
        let bold = get_metrics(Font::TimesBold).measure_str(text);
        assert!(
            bold > regular,
            "bold ({bold}) should be wider than regular ({regular})"
        );
    }

    #[test]
    fn test_wrap_empty_yields_no_lines() {
        let metrics = get_metrics(Font::TimesRoman);
        assert!(metrics.wrap("", 40.0).is_empty());
        assert!(metrics.wrap("   ", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_single_word_is_one_line() {
        let metrics = get_metrics(Font::TimesRoman);
        assert_eq!(metrics.wrap("Rust", 40.0), vec!["Rust"]);
    }

    #[test]
    fn test_wrap_overlong_word_stays_whole() {
        let metrics = get_metrics(Font::TimesRoman);
        let word = "a".repeat(200);
        let lines = metrics.wrap(&word, 10.0);
        assert_eq!(lines.len(), 1, "a single word never splits mid-word");
        assert_eq!(lines[0], word);
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        let metrics = get_metrics(Font::TimesRoman);
        // Each "word" is 4 * 0.500 = 2.0em; "word word" with a space is 4.25em.
        let lines = metrics.wrap("word word word", 4.3);
        assert_eq!(
            lines,
            vec!["word word".to_string(), "word".to_string()],
            "should pack two words then break"
        );
    }

    #[test]
    fn test_wrap_joins_collapse_whitespace() {
        let metrics = get_metrics(Font::TimesRoman);
        let lines = metrics.wrap("spread \t out\n   text", 40.0);
        assert_eq!(lines, vec!["spread out text"]);
    }

    #[test]
    fn test_line_count_realistic_bullet() {
        let metrics = get_metrics(Font::TimesRoman);
        // 180mm content width at 11pt ≈ 46.4em.
        let bullet = "Architected a distributed caching layer using Redis and consistent hashing, \
                      reducing p99 latency by 40% under 50k RPS peak load";
        let lines = metrics.line_count(bullet, 46.4);
        assert!(
            (1..=3).contains(&lines),
            "realistic bullet should be 1-3 lines, got {lines}"
        );
    }

    #[test]
    fn test_all_faces_accessible() {
        let _ = get_metrics(Font::Inter);
        let _ = get_metrics(Font::TimesRoman);
        let _ = get_metrics(Font::TimesBold);
        let _ = get_metrics(Font::TimesItalic);
    }
}
