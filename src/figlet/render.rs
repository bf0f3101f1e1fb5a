//! Glyph layout: turning a message into fixed-width banner art
//!
//! Characters are joined according to the font's smush mode: full width,
//! kerning (close up to the boundary), or smushing, where the touching pair
//! of edge characters may merge into one column under the font's controlled
//! rules. Messages wrap at word boundaries to the display width; a single
//! word wider than the display wraps within the word instead.

use super::font::{layout, FigFont, Glyph};

/// Render `text` into banner rows at the given display width.
///
/// Output is deterministic for identical inputs: hardblanks are replaced by
/// spaces, rows are clipped to `width` columns and right-trimmed, and
/// trailing blank rows are removed.
pub fn render(text: &str, font: &FigFont, width: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for para in text.split('\n') {
        let words: Vec<&str> = para.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line: Option<Block> = None;
        for word in words {
            let word_block = block_for(word, font);
            line = Some(match line.take() {
                None => fit_word(word, word_block, font, width, &mut out),
                Some(current) => {
                    let mut candidate = current.clone();
                    candidate.append_char(' ', font);
                    candidate.append_block(&word_block, font);
                    if candidate.width() <= width {
                        candidate
                    } else {
                        current.flush_into(&mut out, font, width);
                        fit_word(word, word_block, font, width, &mut out)
                    }
                }
            });
        }
        if let Some(current) = line {
            current.flush_into(&mut out, font, width);
        }
    }

    while out.last().is_some_and(|row| row.is_empty()) {
        out.pop();
    }
    out
}

/// Place one word at the start of a fresh line.
///
/// A word wider than the display wraps within the word: characters are laid
/// down one at a time and full rows are flushed as they fill up. The block
/// returned holds whatever tail is still open for further words.
fn fit_word(
    word: &str,
    word_block: Block,
    font: &FigFont,
    width: usize,
    out: &mut Vec<String>,
) -> Block {
    if word_block.width() <= width {
        return word_block;
    }

    let mut current = Block::new(font.height);
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.append_char(ch, font);
        if candidate.width() <= width || current.width() == 0 {
            current = candidate;
        } else {
            current.flush_into(out, font, width);
            let mut fresh = Block::new(font.height);
            fresh.append_char(ch, font);
            current = fresh;
        }
    }
    current
}

/// Render one word as a block, smushing its characters together
fn block_for(word: &str, font: &FigFont) -> Block {
    let mut block = Block::new(font.height);
    for ch in word.chars() {
        block.append_char(ch, font);
    }
    block
}

/// A partial line of banner art: `height` rows of uniform width
#[derive(Debug, Clone)]
struct Block {
    rows: Vec<Vec<char>>,
}

impl Block {
    fn new(height: usize) -> Self {
        Block {
            rows: vec![Vec::new(); height],
        }
    }

    fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Append a single character's glyph; characters the font does not
    /// define are skipped.
    fn append_char(&mut self, ch: char, font: &FigFont) {
        if let Some(glyph) = font.glyph(ch) {
            let rows = glyph_rows(glyph, self.rows.len());
            self.append_rows(&rows, font);
        }
    }

    fn append_block(&mut self, other: &Block, font: &FigFont) {
        self.append_rows(&other.rows, font);
    }

    fn append_rows(&mut self, incoming: &[Vec<char>], font: &FigFont) {
        let amount = self.smush_amount(incoming, font);
        for (row, add) in self.rows.iter_mut().zip(incoming) {
            let overlap = amount.min(row.len()).min(add.len());
            let keep = row.len() - overlap;
            let mut merged: Vec<char> = row[..keep].to_vec();
            for k in 0..overlap {
                let left = row[keep + k];
                let right = add[k];
                merged.push(smushem(left, right, font).unwrap_or(right));
            }
            merged.extend_from_slice(&add[overlap..]);
            *row = merged;
        }
    }

    /// How many columns the incoming rows may overlap the current line.
    ///
    /// The minimum over all rows of: trailing blanks on the line, plus
    /// leading blanks on the incoming row, plus one more column when
    /// smushing is on and the touching pair of edge characters smushes.
    fn smush_amount(&self, incoming: &[Vec<char>], font: &FigFont) -> usize {
        let mode = font.smush_mode();
        if mode & (layout::KERN | layout::SMUSH) == 0 {
            return 0;
        }

        let mut amount = usize::MAX;
        for (row, add) in self.rows.iter().zip(incoming) {
            let trailing = row.iter().rev().take_while(|c| **c == ' ').count();
            let leading = add.iter().take_while(|c| **c == ' ').count();
            let left_edge = row.iter().rev().find(|c| **c != ' ');
            let right_edge = add.iter().find(|c| **c != ' ');

            let mut row_amount = trailing + leading;
            if mode & layout::SMUSH != 0 {
                match (left_edge, right_edge) {
                    (None, _) => row_amount += 1,
                    (Some(&l), Some(&r)) => {
                        if smushem(l, r, font).is_some() {
                            row_amount += 1;
                        }
                    }
                    (Some(_), None) => {}
                }
            }
            amount = amount.min(row_amount);
        }
        amount
    }

    fn flush_into(self, out: &mut Vec<String>, font: &FigFont, width: usize) {
        for row in self.rows {
            let printable: String = row
                .into_iter()
                .take(width)
                .map(|c| if c == font.hardblank { ' ' } else { c })
                .collect();
            out.push(printable.trim_end().to_string());
        }
    }
}

fn glyph_rows(glyph: &Glyph, height: usize) -> Vec<Vec<char>> {
    let mut rows: Vec<Vec<char>> = glyph.rows().iter().map(|r| r.chars().collect()).collect();
    rows.resize(height, vec![' '; glyph.width()]);
    rows
}

/// Decide whether two edge characters merge, and into what.
///
/// Blanks always yield to the other character. Non-blank pairs merge only
/// under the font's smushing rules; `None` means the pair cannot overlap.
fn smushem(left: char, right: char, font: &FigFont) -> Option<char> {
    let mode = font.smush_mode();
    let hardblank = font.hardblank;

    if left == ' ' {
        return Some(right);
    }
    if right == ' ' {
        return Some(left);
    }
    if mode & layout::SMUSH == 0 {
        return None;
    }

    let rules = mode & 63;
    if rules == 0 {
        // Universal smushing: hardblanks lose, otherwise the later
        // character wins.
        if left == hardblank {
            return Some(right);
        }
        if right == hardblank {
            return Some(left);
        }
        return Some(right);
    }

    if left == hardblank && right == hardblank {
        return (mode & layout::HARDBLANK != 0).then_some(left);
    }
    if left == hardblank || right == hardblank {
        return None;
    }

    if mode & layout::EQUAL != 0 && left == right {
        return Some(left);
    }

    if mode & layout::LOWLINE != 0 {
        const ABOVE: &str = "|/\\[]{}()<>";
        if left == '_' && ABOVE.contains(right) {
            return Some(right);
        }
        if right == '_' && ABOVE.contains(left) {
            return Some(left);
        }
    }

    if mode & layout::HIERARCHY != 0 {
        let class = |c: char| match c {
            '|' => Some(1),
            '/' | '\\' => Some(2),
            '[' | ']' => Some(3),
            '{' | '}' => Some(4),
            '(' | ')' => Some(5),
            '<' | '>' => Some(6),
            _ => None,
        };
        if let (Some(lc), Some(rc)) = (class(left), class(right)) {
            if lc != rc {
                return Some(if lc > rc { left } else { right });
            }
        }
    }

    if mode & layout::PAIR != 0 {
        let pair = |a: char, b: char| {
            (left == a && right == b) || (left == b && right == a)
        };
        if pair('[', ']') || pair('{', '}') || pair('(', ')') {
            return Some('|');
        }
    }

    if mode & layout::BIGX != 0 {
        match (left, right) {
            ('/', '\\') => return Some('|'),
            ('\\', '/') => return Some('Y'),
            ('>', '<') => return Some('X'),
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figlet::resolve;

    fn standard() -> FigFont {
        resolve::resolve("standard").expect("embedded standard font").font
    }

    #[test]
    fn test_render_is_deterministic() {
        let font = standard();
        let first = render("Welcome", &font, 80);
        let second = render("Welcome", &font, 80);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_rows_fit_display_width() {
        let font = standard();
        for row in render("a very long message that has to wrap", &font, 40) {
            assert!(row.chars().count() <= 40, "row too wide: {:?}", row);
        }
    }

    #[test]
    fn test_wrapping_stacks_blocks() {
        let font = standard();
        let narrow = render("hello world", &font, 24);
        let wide = render("hello world", &font, 80);
        assert!(narrow.len() > wide.len());
    }

    #[test]
    fn test_overlong_word_wraps_within_word() {
        let font = standard();
        let rows = render("abcdefghij", &font, 20);
        assert!(rows.len() > font.height, "expected more than one row group");
        for row in &rows {
            assert!(row.chars().count() <= 20, "row too wide: {:?}", row);
        }
    }

    #[test]
    fn test_trailing_blank_rows_trimmed() {
        let font = standard();
        let rows = render("hi", &font, 80);
        assert!(!rows.last().expect("nonempty render").is_empty());
    }

    #[test]
    fn test_hardblanks_become_spaces() {
        let font = standard();
        for row in render("a b", &font, 80) {
            assert!(!row.contains(font.hardblank));
        }
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let font = standard();
        assert!(render("", &font, 80).is_empty());
    }

    #[test]
    fn test_smushem_rules() {
        let font = standard(); // rules 1+2+4+8
        assert_eq!(smushem('#', '#', &font), Some('#'));
        assert_eq!(smushem(' ', '#', &font), Some('#'));
        assert_eq!(smushem('#', 'x', &font), None);
        assert_eq!(smushem('[', ']', &font), Some('|'));
        assert_eq!(smushem('_', '|', &font), Some('|'));
        assert_eq!(smushem('|', '/', &font), Some('/'));
    }
}
