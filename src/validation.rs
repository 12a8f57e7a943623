//! Contact form field validators.
//!
//! Every predicate is total: malformed input is `false`, never an error.
//! Lengths are UTF-16 code units and "whitespace" is the ECMAScript set, so
//! results agree with what a browser computes for the same form.

use super::*;

pub const PASSWORD_MIN_LEN: usize = 6;
pub const MESSAGE_MAX_LEN: usize = 500;

const NAME_PATTERN: &str = r"^[a-zA-Z\t\n\x0B\x0C\r\x20\xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]{2,50}$";
const EMAIL_PATTERN: &str = r"^[^@\t\n\x0B\x0C\r\x20\xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+@[^@\t\n\x0B\x0C\r\x20\xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+\.[^@\t\n\x0B\x0C\r\x20\xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+$";
const PHONE_PATTERN: &str = r"^\+?[1-9][0-9]{0,15}$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Password,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Password,
        FormField::Message,
    ];

    pub fn input_id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::Message => "message",
        }
    }

    pub fn error_id(self) -> &'static str {
        match self {
            Self::Name => "nameError",
            Self::Email => "emailError",
            Self::Phone => "phoneError",
            Self::Password => "passwordError",
            Self::Message => "messageError",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
            Self::Password => 3,
            Self::Message => 4,
        }
    }

    /// Shown while the user is typing.
    pub fn live_message(self) -> &'static str {
        match self {
            Self::Name => "Name must be 2-50 characters and contain only letters",
            Self::Email => "Please enter a valid email address",
            Self::Phone => "Please enter a valid phone number",
            Self::Password => "Password must be at least 6 characters long",
            Self::Message => "Message must be less than 500 characters",
        }
    }

    /// Shown when a submit attempt fails on this field.
    pub fn submit_message(self) -> &'static str {
        match self {
            Self::Name => "Name is required (2-50 characters)",
            Self::Email => "Valid email is required",
            Self::Phone => "Please enter a valid phone number",
            Self::Password => "Password must be at least 6 characters",
            Self::Message => "Message must be less than 500 characters",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_id())
    }
}

/// The regex-backed validators, compiled once.
#[derive(Debug, Clone)]
pub struct Validators {
    name: Pattern,
    email: Pattern,
    phone: Pattern,
}

impl Validators {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name: Pattern::new(NAME_PATTERN)?,
            email: Pattern::new(EMAIL_PATTERN)?,
            phone: Pattern::new(PHONE_PATTERN)?,
        })
    }

    pub fn validate_name(&self, name: &str) -> bool {
        matches_or_false(&self.name, js_trim(name))
    }

    pub fn validate_email(&self, email: &str) -> bool {
        matches_or_false(&self.email, js_trim(email))
    }

    /// Empty means "not provided" and is accepted. Spaces, hyphens and
    /// parentheses are ignored before matching.
    pub fn validate_phone(&self, phone: &str) -> bool {
        if phone.is_empty() {
            return true;
        }
        let digits: String = phone
            .chars()
            .filter(|c| !(is_js_whitespace(*c) || matches!(c, '-' | '(' | ')')))
            .collect();
        matches_or_false(&self.phone, &digits)
    }

    pub fn validate(&self, field: FormField, value: &str) -> bool {
        match field {
            FormField::Name => self.validate_name(value),
            FormField::Email => self.validate_email(value),
            FormField::Phone => self.validate_phone(value),
            FormField::Password => validate_password(value),
            FormField::Message => validate_message(value),
        }
    }
}

pub fn validate_password(password: &str) -> bool {
    js_length(password) >= PASSWORD_MIN_LEN
}

pub fn validate_message(message: &str) -> bool {
    js_length(message) <= MESSAGE_MAX_LEN
}

fn matches_or_false(pattern: &Pattern, input: &str) -> bool {
    pattern.is_match(input).unwrap_or(false)
}

pub(crate) fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub(crate) fn js_trim(value: &str) -> &str {
    value.trim_matches(is_js_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validators() -> Validators {
        Validators::new().expect("patterns compile")
    }

    #[test]
    fn name_accepts_letters_and_inner_spaces() {
        let v = validators();
        assert!(v.validate_name("Jo"));
        assert!(v.validate_name("  Ada Lovelace  "));
        assert!(v.validate_name(&"a".repeat(50)));
        assert!(!v.validate_name("J"));
        assert!(!v.validate_name(&"a".repeat(51)));
        assert!(!v.validate_name("R2D2"));
        assert!(!v.validate_name("O'Brien"));
        assert!(!v.validate_name("José"));
        assert!(!v.validate_name("   "));
    }

    #[test]
    fn email_requires_at_and_dot_without_whitespace() {
        let v = validators();
        assert!(v.validate_email("a@b.co"));
        assert!(v.validate_email(" user@example.com\n"));
        assert!(v.validate_email("first.last@sub.example.org"));
        assert!(!v.validate_email("ab.co"));
        assert!(!v.validate_email("a@bco"));
        assert!(!v.validate_email("a b@c.d"));
        assert!(!v.validate_email("a@@b.co"));
        assert!(!v.validate_email("a@b."));
        assert!(!v.validate_email(""));
    }

    #[test]
    fn phone_is_optional_and_normalized() {
        let v = validators();
        assert!(v.validate_phone(""));
        assert!(v.validate_phone("+1234567890"));
        assert!(v.validate_phone("(555) 123-4567"));
        assert!(v.validate_phone("7"));
        assert!(v.validate_phone(&format!("+1{}", "0".repeat(15))));
        assert!(!v.validate_phone(&format!("1{}", "0".repeat(16))));
        assert!(!v.validate_phone("abc"));
        assert!(!v.validate_phone("0123"));
        assert!(!v.validate_phone("++1"));
        assert!(!v.validate_phone(" "));
        assert!(!v.validate_phone("١٢٣"));
    }

    #[test]
    fn password_and_message_use_utf16_length() {
        assert!(!validate_password("12345"));
        assert!(validate_password("123456"));
        assert!(validate_password("😀😀😀"));
        assert!(validate_message(""));
        assert!(validate_message(&"x".repeat(500)));
        assert!(!validate_message(&"x".repeat(501)));
        assert!(!validate_message(&"😀".repeat(251)));
    }

    #[test]
    fn validate_dispatches_by_field() {
        let v = validators();
        assert!(v.validate(FormField::Name, "Ann"));
        assert!(!v.validate(FormField::Email, "nope"));
        assert!(v.validate(FormField::Phone, ""));
        assert!(!v.validate(FormField::Password, "short"));
        assert!(v.validate(FormField::Message, "hi"));
    }

    #[test]
    fn js_trim_strips_bom_but_not_next_line() {
        assert_eq!(js_trim("\u{FEFF} a \u{3000}"), "a");
        assert_eq!(js_trim("\u{85}a"), "\u{85}a");
    }
}
