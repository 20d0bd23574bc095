// Функции сопоставления для лексического анализатора

/// Целое число: необязательный `-`, затем хотя бы одна цифра
fn read_number(input: &[char], at: usize) -> Option<usize> {
    let sign = usize::from(input.get(at) == Some(&'-'));
    let digits = input[at + sign..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    (digits > 0).then_some(sign + digits)
}

/// Строковый литерал в одинарных кавычках, `''` внутри строки не завершает её.
///
/// Незакрытая строка не совпадает ни с чем.
fn read_string_literal(input: &[char], at: usize) -> Option<usize> {
    if input.get(at) != Some(&'\'') {
        return None;
    }
    let mut i = at + 1;
    while i < input.len() {
        if input[i] == '\'' {
            if input.get(i + 1) == Some(&'\'') {
                i += 2;
                continue;
            }
            return Some(i + 1 - at);
        }
        i += 1;
    }
    None
}

/// Длина слова: буква или `_`, затем буквы, цифры, `_`
fn word_length(input: &[char], at: usize) -> Option<usize> {
    let first = *input.get(at)?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    let rest = input[at + 1..]
        .iter()
        .take_while(|c| c.is_alphanumeric() || **c == '_')
        .count();
    Some(1 + rest)
}

/// Слово целиком, если оно входит в набор ключевых слов
fn read_keyword(input: &[char], at: usize) -> Option<usize> {
    let len = word_length(input, at)?;
    let word: String = input[at..at + len].iter().collect();
    crate::parser::token::is_keyword(&word).then_some(len)
}

fn read_identifier(input: &[char], at: usize) -> Option<usize> {
    word_length(input, at)
}

/// `!=`, `<=`, `>=`
fn read_comparison_operator(input: &[char], at: usize) -> Option<usize> {
    match (input.get(at), input.get(at + 1)) {
        (Some('!' | '<' | '>'), Some('=')) => Some(2),
        _ => None,
    }
}

fn read_single_char_operator(input: &[char], at: usize) -> Option<usize> {
    matches!(input.get(at), Some('=' | '<' | '>' | '*')).then_some(1)
}

fn read_delimiter(input: &[char], at: usize) -> Option<usize> {
    matches!(input.get(at), Some('(' | ')' | ',' | ';')).then_some(1)
}

fn read_whitespace(input: &[char], at: usize) -> Option<usize> {
    let count = input[at..].iter().take_while(|c| c.is_whitespace()).count();
    (count > 0).then_some(count)
}
