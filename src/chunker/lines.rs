/// Splits a page's raw text into candidate lines for classification.
///
/// Upstream extraction is inconsistent: some pages preserve true line
/// breaks, others come back as one undifferentiated block of prose. Pages
/// with newlines split on them; any resulting line that exceeds the resplit
/// threshold and carries sentence punctuation is re-split on sentence
/// boundaries so merged structural lines are not lost. Pages without any
/// newline split purely on sentence boundaries.
pub fn split_lines(page_text: &str, long_line_resplit_chars: usize) -> Vec<String> {
    if !page_text.contains('\n') {
        return split_sentences(page_text);
    }

    let mut lines = Vec::new();
    for raw in page_text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.chars().count() > long_line_resplit_chars
            && line.contains(['.', '!', '?'])
        {
            lines.extend(split_sentences(line));
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

/// Splits on sentence boundaries: after `.`/`!`/`?` followed by whitespace,
/// where the next character is upper-case, a digit, or an opening
/// parenthesis. The regex crate has no look-around, so this is a manual
/// scan with the same semantics.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;

    while index < chars.len() {
        if matches!(chars[index], '.' | '!' | '?') {
            let mut next = index + 1;
            while next < chars.len() && chars[next].is_whitespace() {
                next += 1;
            }

            let splits_here = next > index + 1
                && next < chars.len()
                && (chars[next].is_uppercase()
                    || chars[next].is_ascii_digit()
                    || chars[next] == '(');

            if splits_here {
                push_trimmed(&chars[start..=index], &mut sentences);
                start = next;
                index = next;
                continue;
            }
        }
        index += 1;
    }

    push_trimmed(&chars[start..], &mut sentences);
    sentences
}

fn push_trimmed(chars: &[char], out: &mut Vec<String>) {
    let segment: String = chars.iter().collect();
    let segment = segment.trim();
    if !segment.is_empty() {
        out.push(segment.to_string());
    }
}
