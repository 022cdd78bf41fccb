//! Template helper functions: L.Ts(), RootURL(), LogoURL(), Safe(),
//! ToUpper(), ToLower(), upper(), lower(), eq(), ne(), Date(), and UnixTime().

use minijinja::value::{from_args, Object, Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind, State};
use mp_core::{Config, Translations};
use std::sync::Arc;

/// Read-only configuration behind the helper functions.
///
/// Built once at startup and shared by every template set.
#[derive(Debug, Clone)]
pub struct Helpers {
    /// Value of `RootURL()`
    pub root_url: String,
    /// Value of `LogoURL()`
    pub logo_url: String,
    /// Dictionary behind `L.Ts()`
    pub translations: Arc<Translations>,
}

impl Helpers {
    /// Create helpers from explicit values
    pub fn new(root_url: &str, logo_url: &str, translations: Translations) -> Self {
        Self {
            root_url: root_url.to_string(),
            logo_url: logo_url.to_string(),
            translations: Arc::new(translations),
        }
    }

    /// Create helpers from the project configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.root_url,
            &config.logo_url(),
            Translations::from(&config.translations),
        )
    }

    /// Register every helper on `env`
    pub(crate) fn register(&self, env: &mut Environment<'_>) {
        env.add_global(
            "L",
            Value::from_object(Translator {
                strings: self.translations.clone(),
            }),
        );
        env.add_function("t", make_translate_fn(self.translations.clone()));
        env.add_function("RootURL", make_url_fn(&self.root_url));
        env.add_function("LogoURL", make_url_fn(&self.logo_url));
        env.add_function("Safe", make_safe_fn());
        env.add_function("ToUpper", |s: &str| s.to_uppercase());
        env.add_function("ToLower", |s: &str| s.to_lowercase());
        // Builtin `upper`/`lower` are filters only; templates also call them.
        env.add_function("upper", |s: &str| s.to_uppercase());
        env.add_function("lower", |s: &str| s.to_lowercase());
        env.add_function("eq", make_eq_fn());
        env.add_function("ne", make_ne_fn());
        env.add_function("Date", make_date_fn());
        env.add_function("UnixTime", make_unix_time_fn());
    }
}

/// Translation lookup exposed to templates as the global `L`.
///
/// Supports `{{ L.Ts("key") }}`, `{{ L.T("key") }}`, and `{{ L().Ts("key") }}`.
#[derive(Debug, Clone)]
pub(crate) struct Translator {
    strings: Arc<Translations>,
}

impl Object for Translator {
    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "Ts" | "T" => {
                let (key,): (&str,) = from_args(args)?;
                Ok(Value::from(self.strings.lookup(key)))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("L has no method named {}", method),
            )),
        }
    }

    fn call(self: &Arc<Self>, _state: &State<'_, '_>, args: &[Value]) -> Result<Value, Error> {
        if !args.is_empty() {
            return Err(Error::new(
                ErrorKind::TooManyArguments,
                "L() takes no arguments",
            ));
        }
        Ok(Value::from_object((**self).clone()))
    }
}

/// Create the `t(key)` shorthand for `L.Ts(key)`
fn make_translate_fn(
    strings: Arc<Translations>,
) -> impl Fn(&str) -> String + Send + Sync + Clone + 'static {
    move |key: &str| strings.lookup(key).to_string()
}

/// Create a zero-argument accessor returning a fixed URL.
///
/// The URL comes from configuration, so it is returned as safe markup and
/// survives HTML auto-escaping unchanged.
fn make_url_fn(url: &str) -> impl Fn() -> Value + Send + Sync + Clone + 'static {
    let shared: Arc<str> = url.into();
    move || Value::from_safe_string(shared.to_string())
}

/// Create the `Safe(html)` function marking a string as trusted markup
///
/// Usage in templates:
/// ```jinja
/// {{ Safe("<b>already escaped</b>") }}
/// ```
fn make_safe_fn() -> impl Fn(String) -> Value + Send + Sync + Clone + 'static {
    Value::from_safe_string
}

/// A value that `eq`/`ne` are allowed to compare
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Convert a template value, rejecting sequences, maps, and none
    pub(crate) fn from_value(value: &Value) -> Result<Self, Error> {
        match value.kind() {
            ValueKind::String => Ok(Scalar::Str(value.as_str().unwrap_or_default().to_string())),
            ValueKind::Bool => Ok(Scalar::Bool(value.is_true())),
            ValueKind::Number => {
                if let Ok(i) = i64::try_from(value.clone()) {
                    Ok(Scalar::Int(i))
                } else {
                    f64::try_from(value.clone()).map(Scalar::Float)
                }
            }
            other => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("cannot compare {} values; eq/ne accept strings, numbers, and booleans", other),
            )),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Str(_) => "string",
            Scalar::Int(_) | Scalar::Float(_) => "number",
            Scalar::Bool(_) => "bool",
        }
    }

    /// Typed equality; numbers compare across int/float, other kinds
    /// must match exactly
    pub(crate) fn equals(&self, other: &Scalar) -> Result<bool, Error> {
        match (self, other) {
            (Scalar::Str(a), Scalar::Str(b)) => Ok(a == b),
            (Scalar::Bool(a), Scalar::Bool(b)) => Ok(a == b),
            (Scalar::Int(a), Scalar::Int(b)) => Ok(a == b),
            (Scalar::Int(a), Scalar::Float(b)) | (Scalar::Float(b), Scalar::Int(a)) => {
                Ok((*a as f64) == *b)
            }
            (Scalar::Float(a), Scalar::Float(b)) => Ok(a == b),
            (a, b) => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("cannot compare {} with {}", a.kind_name(), b.kind_name()),
            )),
        }
    }
}

/// Create the `eq(a, b)` predicate
///
/// Usage in templates:
/// ```jinja
/// {% if eq(Lists[0].Type, "public") %}...{% endif %}
/// ```
fn make_eq_fn() -> impl Fn(Value, Value) -> Result<bool, Error> + Send + Sync + Clone + 'static {
    |a: Value, b: Value| Scalar::from_value(&a)?.equals(&Scalar::from_value(&b)?)
}

/// Create the `ne(a, b)` predicate, the negation of `eq`
fn make_ne_fn() -> impl Fn(Value, Value) -> Result<bool, Error> + Send + Sync + Clone + 'static {
    |a: Value, b: Value| Scalar::from_value(&a)?.equals(&Scalar::from_value(&b)?).map(|eq| !eq)
}

/// Create the `Date(value)` formatter.
///
/// RFC 3339 timestamps render as `YYYY-MM-DD HH:MM`; anything else renders
/// as its plain string form.
fn make_date_fn() -> impl Fn(Value) -> String + Send + Sync + Clone + 'static {
    |value: Value| match value
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
    {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => value.to_string(),
    }
}

/// Create the `UnixTime(value)` function.
///
/// Returns unix seconds for RFC 3339 timestamps and integers, 0 otherwise.
fn make_unix_time_fn() -> impl Fn(Value) -> i64 + Send + Sync + Clone + 'static {
    |value: Value| {
        if let Some(s) = value.as_str() {
            return chrono::DateTime::parse_from_rfc3339(s)
                .map(|ts| ts.timestamp())
                .unwrap_or(0);
        }
        i64::try_from(value).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
