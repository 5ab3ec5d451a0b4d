//! Attribute validations.
//!
//! Validations are recorded as written by the builders. Whether their
//! constants make sense, and whether default and example values satisfy them,
//! is decided by the validate phase.

use core::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;

use super::Value;

/// Well-known string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Date,
    DateTime,
    Uuid,
    Email,
    Hostname,
    Ipv4,
    Ipv6,
    Ip,
    Uri,
    Mac,
    Cidr,
    Regexp,
    Json,
    Rfc1123,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Date => "date",
            Format::DateTime => "date-time",
            Format::Uuid => "uuid",
            Format::Email => "email",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Ip => "ip",
            Format::Uri => "uri",
            Format::Mac => "mac",
            Format::Cidr => "cidr",
            Format::Regexp => "regexp",
            Format::Json => "json",
            Format::Rfc1123 => "rfc1123",
        };
        f.write_str(name)
    }
}

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid format regex")
});
static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[Tt]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:\d{2})$")
        .expect("valid format regex")
});
static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid format regex")
});
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid format regex")
});
static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("valid format regex")
});
static URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:\S*$").expect("valid format regex"));
static MAC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]{2}[:-]){5}[0-9a-fA-F]{2}$").expect("valid format regex")
});

impl Format {
    /// Check `s` against the format.
    ///
    /// `json` and `rfc1123` are accepted without inspection.
    pub fn matches(self, s: &str) -> bool {
        match self {
            Format::Date => DATE.is_match(s),
            Format::DateTime => DATE_TIME.is_match(s),
            Format::Uuid => UUID.is_match(s),
            Format::Email => EMAIL.is_match(s),
            Format::Hostname => s.len() <= 253 && HOSTNAME.is_match(s),
            Format::Ipv4 => s.parse::<Ipv4Addr>().is_ok(),
            Format::Ipv6 => s.parse::<Ipv6Addr>().is_ok(),
            Format::Ip => s.parse::<IpAddr>().is_ok(),
            Format::Uri => URI.is_match(s),
            Format::Mac => MAC.is_match(s),
            Format::Cidr => match s.split_once('/') {
                Some((addr, bits)) => match (addr.parse::<IpAddr>(), bits.parse::<u8>()) {
                    (Ok(IpAddr::V4(_)), Ok(bits)) => bits <= 32,
                    (Ok(IpAddr::V6(_)), Ok(bits)) => bits <= 128,
                    _ => false,
                },
                None => false,
            },
            Format::Regexp => Regex::new(s).is_ok(),
            Format::Json | Format::Rfc1123 => true,
        }
    }
}

/// Validations attached to an attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    pub values: Vec<Value>,
    pub format: Option<Format>,
    pub pattern: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    /// Names of required child attributes.
    pub required: Vec<String>,
}

impl Validation {
    pub fn is_empty(&self) -> bool {
        *self == Validation::default()
    }

    /// Problems with `value` under these validations, one message each.
    ///
    /// `pattern` is `None` when the pattern did not compile; that case is
    /// reported separately.
    pub fn check_value(&self, value: &Value, pattern: Option<&Regex>, check_format: bool) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.values.is_empty() && !self.values.contains(value) {
            let allowed: Vec<String> = self.values.iter().map(ToString::to_string).collect();
            problems.push(format!(
                "value {} is not one of the allowed values [{}]",
                value,
                allowed.join(", ")
            ));
        }
        problems.extend(self.check_constraints(value, pattern, check_format));
        problems
    }

    /// Like [`Validation::check_value`], without the enum membership check.
    /// Used for the enum values themselves.
    pub fn check_constraints(
        &self,
        value: &Value,
        pattern: Option<&Regex>,
        check_format: bool,
    ) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(len) = value.length() {
            let len = len as i64;
            if let Some(min) = self.min_length.filter(|min| len < *min) {
                problems.push(format!("value {} is shorter than the minimum length {}", value, min));
            }
            if let Some(max) = self.max_length.filter(|max| len > *max) {
                problems.push(format!("value {} is longer than the maximum length {}", value, max));
            }
        }

        if let Some(x) = value.as_f64() {
            if let Some(min) = self.minimum.filter(|min| x < *min) {
                problems.push(format!("value {} is lower than the minimum {}", value, min));
            }
            if let Some(max) = self.maximum.filter(|max| x > *max) {
                problems.push(format!("value {} is greater than the maximum {}", value, max));
            }
        }

        if let Some(s) = value.as_str() {
            if let (Some(re), Some(source)) = (pattern, &self.pattern) {
                if !re.is_match(s) {
                    problems.push(format!("value {} does not match the pattern {}", value, source));
                }
            }
            if let Some(format) = self.format.filter(|_| check_format) {
                if !format.matches(s) {
                    problems.push(format!("value {} is not a valid {}", value, format));
                }
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_formats() {
        assert!(Format::Email.matches("support@example.com"));
        assert!(!Format::Email.matches("support"));
        assert!(Format::Uuid.matches("123e4567-e89b-12d3-a456-426614174000"));
        assert!(!Format::Uuid.matches("123e4567"));
        assert!(Format::Date.matches("2024-02-29"));
        assert!(!Format::Date.matches("2024-13-01"));
        assert!(Format::DateTime.matches("2024-02-29T10:00:00Z"));
        assert!(Format::Ipv4.matches("10.0.0.1"));
        assert!(!Format::Ipv4.matches("::1"));
        assert!(Format::Ip.matches("::1"));
        assert!(Format::Cidr.matches("10.0.0.0/8"));
        assert!(!Format::Cidr.matches("10.0.0.0/33"));
        assert!(Format::Mac.matches("00:1a:2b:3c:4d:5e"));
        assert!(Format::Uri.matches("https://example.com/a"));
        assert!(Format::Hostname.matches("api.example.com"));
        assert!(!Format::Hostname.matches("-bad-.com"));
    }

    #[test]
    fn test_check_value_enum_and_length() {
        let validation = Validation {
            values: vec!["a".into(), "bb".into()],
            max_length: Some(1),
            ..Validation::default()
        };
        assert!(validation.check_value(&"a".into(), None, true).is_empty());
        assert_eq!(validation.check_value(&"bb".into(), None, true).len(), 1);
        assert_eq!(validation.check_value(&"ccc".into(), None, true).len(), 2);
    }

    #[test]
    fn test_check_constraints_skips_membership() {
        let validation = Validation {
            values: vec!["ab".into()],
            min_length: Some(5),
            pattern: Some("^A".to_string()),
            ..Validation::default()
        };
        let re = Regex::new("^A").unwrap();
        let problems = validation.check_constraints(&"ab".into(), Some(&re), true);
        assert_eq!(
            problems,
            vec![
                "value \"ab\" is shorter than the minimum length 5".to_string(),
                "value \"ab\" does not match the pattern ^A".to_string(),
            ]
        );
    }

    #[test]
    fn test_check_value_range() {
        let validation = Validation {
            minimum: Some(1.0),
            maximum: Some(10.0),
            ..Validation::default()
        };
        assert!(validation.check_value(&Value::Int(5), None, true).is_empty());
        assert_eq!(validation.check_value(&Value::Int(0), None, true).len(), 1);
        assert_eq!(validation.check_value(&Value::Float(10.5), None, true).len(), 1);
    }

    #[test]
    fn test_check_value_pattern_and_format() {
        let validation = Validation {
            pattern: Some("^A".to_string()),
            format: Some(Format::Email),
            ..Validation::default()
        };
        let re = Regex::new("^A").unwrap();
        assert!(validation.check_value(&"A@b.io".into(), Some(&re), true).is_empty());
        assert_eq!(validation.check_value(&"nope".into(), Some(&re), true).len(), 2);
        assert_eq!(validation.check_value(&"nope".into(), Some(&re), false).len(), 1);
    }
}
