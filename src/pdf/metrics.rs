//! Helvetica glyph metrics for measuring, clipping and wrapping text
//!
//! Only the standard 14 fonts are used for output, so no font program is
//! embedded and the widths below come from the Helvetica AFM.

/// Width used for characters outside the printable ASCII table
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica widths for chars 32-126, in 1/1000ths of the em square
const HELVETICA_WIDTHS: [u16; 95] = [
    278, // 32 space
    278, // 33 !
    355, // 34 "
    556, // 35 #
    556, // 36 $
    889, // 37 %
    667, // 38 &
    191, // 39 '
    333, // 40 (
    333, // 41 )
    389, // 42 *
    584, // 43 +
    278, // 44 ,
    333, // 45 -
    278, // 46 .
    278, // 47 /
    556, // 48 0
    556, // 49 1
    556, // 50 2
    556, // 51 3
    556, // 52 4
    556, // 53 5
    556, // 54 6
    556, // 55 7
    556, // 56 8
    556, // 57 9
    278, // 58 :
    278, // 59 ;
    584, // 60 <
    584, // 61 =
    584, // 62 >
    556, // 63 ?
    1015, // 64 @
    667, // 65 A
    667, // 66 B
    722, // 67 C
    722, // 68 D
    667, // 69 E
    611, // 70 F
    778, // 71 G
    722, // 72 H
    278, // 73 I
    500, // 74 J
    667, // 75 K
    556, // 76 L
    833, // 77 M
    722, // 78 N
    778, // 79 O
    667, // 80 P
    778, // 81 Q
    722, // 82 R
    667, // 83 S
    611, // 84 T
    722, // 85 U
    667, // 86 V
    944, // 87 W
    667, // 88 X
    667, // 89 Y
    611, // 90 Z
    278, // 91 [
    278, // 92 \
    278, // 93 ]
    469, // 94 ^
    556, // 95 _
    333, // 96 `
    556, // 97 a
    556, // 98 b
    500, // 99 c
    556, // 100 d
    556, // 101 e
    278, // 102 f
    556, // 103 g
    556, // 104 h
    222, // 105 i
    222, // 106 j
    500, // 107 k
    222, // 108 l
    833, // 109 m
    556, // 110 n
    556, // 111 o
    556, // 112 p
    556, // 113 q
    333, // 114 r
    500, // 115 s
    278, // 116 t
    556, // 117 u
    500, // 118 v
    722, // 119 w
    500, // 120 x
    500, // 121 y
    500, // 122 z
    334, // 123 {
    260, // 124 |
    334, // 125 }
    584, // 126 ~
];

/// Advance width of one character in 1/1000ths of the em square
pub fn char_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` set in Helvetica at `font_size` points
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    units as f32 * font_size / 1000.0
}

/// Longest prefix of `text` that fits in `max_width` points
pub fn fit_to_width(text: &str, font_size: f32, max_width: f32) -> &str {
    let mut width = 0.0;
    for (idx, c) in text.char_indices() {
        width += char_width(c) as f32 * font_size / 1000.0;
        if width > max_width {
            return &text[..idx];
        }
    }
    text
}

/// Greedy word wrap to lines no wider than `max_width` points
///
/// A single word wider than the line is kept whole on its own line.
pub fn wrap_words(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate_width = text_width(&current, font_size)
            + text_width(" ", font_size)
            + text_width(word, font_size);
        if candidate_width <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode text for a WinAnsiEncoding simple font
///
/// Latin-1 characters map to their own byte, the typographic punctuation
/// and symbols of Windows-1252 to 0x80-0x9F; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E | 0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => b'?',
    }
}
