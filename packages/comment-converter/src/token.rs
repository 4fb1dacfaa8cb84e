use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// A piece of comment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Whitespace(&'a str),
    /// `.`, `,` or `;`
    Separator(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Word,
    Whitespace,
    Separator,
}

impl Class {
    fn of(c: char) -> Class {
        match c {
            '.' | ',' | ';' => Class::Separator,
            c if c.is_whitespace() => Class::Whitespace,
            _ => Class::Word,
        }
    }

    fn token(self, text: &str) -> Token<'_> {
        match self {
            Class::Word => Token::Word(text),
            Class::Whitespace => Token::Whitespace(text),
            Class::Separator => Token::Separator(text),
        }
    }
}

/// Splits text into maximal runs of the same class.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut run: Option<(Class, usize)> = None;

    for (offset, c) in source.char_indices() {
        let class = Class::of(c);
        match run {
            Some((current, _)) if current == class => {}
            Some((current, start)) => {
                tokens.push(current.token(&source[start..offset]));
                run = Some((class, offset));
            }
            None => run = Some((class, offset)),
        }
    }

    if let Some((class, start)) = run {
        tokens.push(class.token(&source[start..]));
    }
    tokens
}

/// Applies the Rust doc conventions to a token stream.
pub fn rewrite(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    let mut rest = tokens;
    while !rest.is_empty() {
        let (consumed, text) = rewrite_next(rest);
        out += &text;
        rest = &rest[consumed..];
    }
    out
}

fn rewrite_next(tokens: &[Token<'_>]) -> (usize, String) {
    use Token::*;
    match tokens {
        [Word("@param"), Whitespace(" "), Word(name), ..] => (3, format!("- `{name}` ")),
        [Word("@return"), Whitespace(_), Word(_), ..] => (2, "Returns: ".into()),
        [Word(word), ..] => (1, rewrite_word(word)),
        [Whitespace(text) | Separator(text), ..] => (1, text.to_string()),
        [] => (0, String::new()),
    }
}

fn rewrite_word(word: &str) -> String {
    if let Some(reference) = word.strip_prefix("Sk") {
        return format!("[`{}`]", native_reference(reference));
    }
    if word.starts_with("https://") {
        return format!("<{word}>");
    }
    if word == "true" || word == "false" {
        return format!("`{word}`");
    }
    if let Some(function) = c_function_call(word) {
        return format!("`{function}`");
    }
    word.to_string()
}

/// `isEmpty()` becomes `is_empty()`.
fn c_function_call(word: &str) -> Option<String> {
    let name = word.strip_suffix("()")?;
    (name.to_lower_camel_case() == name).then(|| name.to_snake_case() + "()")
}

/// `Path::Verb` becomes `path::Verb`, `Path::updateBoundsCache` becomes
/// `Path::update_bounds_cache`.
fn native_reference(reference: &str) -> String {
    if let Some((type_name, member)) = reference.split_once("::") {
        if member.to_upper_camel_case() == member {
            return format!("{}::{member}", type_name.to_snake_case());
        }
        if member.to_lower_camel_case() == member {
            return format!("{type_name}::{}", member.to_snake_case());
        }
    }
    reference.to_string()
}
