use crate::token::{rewrite, tokenize};

/// Runs the whole conversion on one comment.
pub fn convert(source: &str) -> String {
    let kept = retain_lines(source, |line| !is_comment_frame(line));
    let kept = {
        let mut lines: Vec<String> = lines(&kept).into_iter().map(str::to_string).collect();
        if let Some(first) = lines.first_mut() {
            *first = open_marker_to_indent(first);
        }
        lines.join("\n")
    };

    let body = trim_common_indent(&kept, |b| b == b' ');
    let body = trim_common_indent(&body, |b| b == b'*');
    let body = trim_common_indent(&body, |b| b == b' ');

    prefix_doc_lines(&rewrite(&tokenize(&body)))
}

/// Splits into lines so that `lines(s).join("\n") == s`, unlike
/// [`str::lines`] which drops a trailing empty line.
pub fn lines(all: &str) -> Vec<&str> {
    let mut result: Vec<_> = all.lines().collect();
    if all.ends_with('\n') {
        result.push("");
    }
    result
}

/// `/**`, `*/` and `/** \class Foo` lines carry no text.
fn is_comment_frame(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == "/**" || trimmed == "*/" || trimmed.starts_with("/** \\")
}

fn retain_lines(source: &str, keep: impl Fn(&str) -> bool) -> String {
    lines(source)
        .into_iter()
        .filter(|line| keep(*line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A `/** ` opening the first line becomes four spaces, so the text keeps
/// its column.
fn open_marker_to_indent(first_line: &str) -> String {
    let indent = indent_size(first_line, |b| b == b' ').unwrap_or_default();
    match first_line[indent..].strip_prefix("/** ") {
        Some(rest) => format!("{}    {}", &first_line[..indent], rest),
        None => first_line.to_string(),
    }
}

fn indent_size(line: &str, is_indent: impl Fn(u8) -> bool) -> Option<usize> {
    line.bytes().position(|b| !is_indent(b))
}

/// Removes the indent shared by every line that has content.
fn trim_common_indent(source: &str, is_indent: impl Fn(u8) -> bool) -> String {
    let common = source
        .lines()
        .filter_map(|line| indent_size(line, &is_indent))
        .min()
        .unwrap_or_default();

    lines(source)
        .into_iter()
        .map(|line| {
            // Indent bytes are ASCII, so this never splits a character unless
            // the line is shorter than the common indent.
            let skip = line
                .bytes()
                .take(common)
                .take_while(|&b| is_indent(b))
                .count();
            &line[skip..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn prefix_doc_lines(text: &str) -> String {
    let all = lines(text);
    let last = all.len().saturating_sub(1);
    all.iter()
        .enumerate()
        .map(|(i, line)| {
            let trailing_blank = i == last && line.trim().is_empty();
            if trailing_blank || line.starts_with("/// ") {
                line.to_string()
            } else {
                format!("/// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
