/// Legacy `KeyboardEvent.keyCode` for a `KeyboardEvent.key` value on a US
/// layout. Unknown keys map to 0.
pub fn legacy_key_code(key: &str) -> u32 {
    let mut chars = key.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return match ch {
            'a'..='z' => ch.to_ascii_uppercase() as u32,
            'A'..='Z' | '0'..='9' => ch as u32,
            ' ' => 32,
            ';' | ':' => 186,
            '=' | '+' => 187,
            ',' | '<' => 188,
            '-' | '_' => 189,
            '.' | '>' => 190,
            '/' | '?' => 191,
            '`' | '~' => 192,
            '[' | '{' => 219,
            '\\' | '|' => 220,
            ']' | '}' => 221,
            '\'' | '"' => 222,
            ')' => 48,
            '!' => 49,
            '@' => 50,
            '#' => 51,
            '$' => 52,
            '%' => 53,
            '^' => 54,
            '&' => 55,
            '*' => 56,
            '(' => 57,
            _ => 0,
        };
    }

    match key {
        "Backspace" => 8,
        "Tab" => 9,
        "Enter" => 13,
        "Shift" => 16,
        "Control" => 17,
        "Alt" => 18,
        "Pause" => 19,
        "CapsLock" => 20,
        "Escape" => 27,
        "PageUp" => 33,
        "PageDown" => 34,
        "End" => 35,
        "Home" => 36,
        "ArrowLeft" => 37,
        "ArrowUp" => 38,
        "ArrowRight" => 39,
        "ArrowDown" => 40,
        "Insert" => 45,
        "Delete" => 46,
        "Meta" => 91,
        "F1" => 112,
        "F2" => 113,
        "F3" => 114,
        "F4" => 115,
        "F5" => 116,
        "F6" => 117,
        "F7" => 118,
        "F8" => 119,
        "F9" => 120,
        "F10" => 121,
        "F11" => 122,
        "F12" => 123,
        _ => 0,
    }
}

/// What a key press does to a text control's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum KeyEdit {
    Insert(char),
    DeleteBackward,
    None,
}

pub(crate) fn key_edit(key: &str) -> KeyEdit {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => KeyEdit::Insert(ch),
        _ if key == "Backspace" => KeyEdit::DeleteBackward,
        _ => KeyEdit::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_use_ascii_codes() {
        assert_eq!(legacy_key_code("a"), 65);
        assert_eq!(legacy_key_code("Z"), 90);
        assert_eq!(legacy_key_code("7"), 55);
        assert_eq!(legacy_key_code(" "), 32);
    }

    #[test]
    fn named_keys_and_punctuation() {
        assert_eq!(legacy_key_code("Enter"), 13);
        assert_eq!(legacy_key_code("Backspace"), 8);
        assert_eq!(legacy_key_code("ArrowDown"), 40);
        assert_eq!(legacy_key_code("-"), 189);
        assert_eq!(legacy_key_code("?"), 191);
        assert_eq!(legacy_key_code("Dead"), 0);
        assert_eq!(legacy_key_code("é"), 0);
    }

    #[test]
    fn key_edit_classifies_keys() {
        assert_eq!(key_edit("x"), KeyEdit::Insert('x'));
        assert_eq!(key_edit("Backspace"), KeyEdit::DeleteBackward);
        assert_eq!(key_edit("Shift"), KeyEdit::None);
    }
}
