//! Single `key:type:value` lines of an RDP file

use std::fmt;

/// Type tag of a directive value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveType {
    /// `i` - integer value
    Integer,
    /// `s` - string value
    String,
    /// `b` - binary value encoded as hex
    Binary,
}

impl DirectiveType {
    pub fn tag(self) -> char {
        match self {
            DirectiveType::Integer => 'i',
            DirectiveType::String => 's',
            DirectiveType::Binary => 'b',
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "i" => Some(DirectiveType::Integer),
            "s" => Some(DirectiveType::String),
            "b" => Some(DirectiveType::Binary),
            _ => None,
        }
    }
}

/// One configuration directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub kind: DirectiveType,
    pub value: String,
}

impl Directive {
    pub fn new(key: impl Into<String>, kind: DirectiveType, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            value: value.into(),
        }
    }

    pub fn integer(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, DirectiveType::Integer, value.to_string())
    }

    /// Parses a line of the form `key:type:value`
    ///
    /// Keys may contain spaces (`screen mode id`). The value is everything
    /// after the second colon and may itself contain colons.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, ':');
        let key = parts.next()?;
        let kind = DirectiveType::from_tag(parts.next()?)?;
        let value = parts.next()?;

        if key.is_empty() {
            return None;
        }

        Some(Self::new(key, kind, value))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.key, self.kind.tag(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_with_spaces() {
        let directive = Directive::parse("screen mode id:i:2").unwrap();
        assert_eq!(directive.key, "screen mode id");
        assert_eq!(directive.kind, DirectiveType::Integer);
        assert_eq!(directive.value, "2");
    }

    #[test]
    fn value_may_contain_colons_or_be_empty() {
        let directive = Directive::parse("full address:s:host.example:3390").unwrap();
        assert_eq!(directive.value, "host.example:3390");

        let directive = Directive::parse("alternate shell:s:").unwrap();
        assert_eq!(directive.value, "");
    }

    #[test]
    fn rejects_lines_that_are_not_directives() {
        assert!(Directive::parse("").is_none());
        assert!(Directive::parse("just some text").is_none());
        assert!(Directive::parse("key:x:value").is_none());
        assert!(Directive::parse(":i:1").is_none());
        assert!(Directive::parse("key:i").is_none());
    }

    #[test]
    fn formats_back_to_a_line() {
        let directive = Directive::new("selectedmonitors", DirectiveType::String, "0,2");
        assert_eq!(directive.to_string(), "selectedmonitors:s:0,2");
        assert_eq!(Directive::integer("use multimon", 1).to_string(), "use multimon:i:1");
    }

    #[test]
    fn parses_binary_values() {
        let directive = Directive::parse("password 51:b:01000000d08c9ddf").unwrap();
        assert_eq!(directive.kind, DirectiveType::Binary);
        assert_eq!(directive.to_string(), "password 51:b:01000000d08c9ddf");
    }
}
