//! Mapping of list query parameters onto a persistence filter.

use serde::Deserialize;
use utoipa::IntoParams;

use super::user::User;

/// Raw query parameters accepted by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQueryParams {
    /// Exact email to match.
    pub email: Option<String>,
    /// Exact name to match.
    pub name: Option<String>,
    /// Age to match; parsed leniently.
    pub age: Option<String>,
}

/// Age constraint carried by a [`UserFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeFilter {
    /// Match records whose age equals the value.
    Exact(i64),
    /// The query value had no leading integer. Matches nothing.
    Unparseable(String),
}

impl AgeFilter {
    /// Parse an age query value.
    ///
    /// Accepts optional leading whitespace, an optional sign, and the leading
    /// run of decimal digits; anything after the digits is ignored. Values
    /// with no digits become [`AgeFilter::Unparseable`].
    ///
    /// # Examples
    /// ```
    /// use usuarios::domain::AgeFilter;
    ///
    /// assert_eq!(AgeFilter::parse("30"), AgeFilter::Exact(30));
    /// assert_eq!(AgeFilter::parse(" 30 years"), AgeFilter::Exact(30));
    /// assert_eq!(AgeFilter::parse("abc"), AgeFilter::Unparseable("abc".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let digits = &unsigned[..digits_end];

        match digits.parse::<i64>() {
            Ok(value) if negative => Self::Exact(-value),
            Ok(value) => Self::Exact(value),
            Err(_) => Self::Unparseable(raw.to_owned()),
        }
    }

    fn matches(&self, age: Option<i32>) -> bool {
        match self {
            Self::Exact(expected) => age.is_some_and(|actual| i64::from(actual) == *expected),
            Self::Unparseable(_) => false,
        }
    }
}

/// Partial-match filter over user fields; unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    email: Option<String>,
    name: Option<String>,
    age: Option<AgeFilter>,
}

impl UserFilter {
    /// The unconstrained filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from list query parameters.
    ///
    /// An empty `age` value is treated as absent.
    pub fn from_query(params: UserQueryParams) -> Self {
        let UserQueryParams { email, name, age } = params;
        Self {
            email,
            name,
            age: age
                .filter(|raw| !raw.is_empty())
                .map(|raw| AgeFilter::parse(&raw)),
        }
    }

    /// Restrict to an exact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Restrict to an exact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restrict by age.
    pub fn with_age(mut self, age: AgeFilter) -> Self {
        self.age = Some(age);
        self
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn age(&self) -> Option<&AgeFilter> {
        self.age.as_ref()
    }

    /// True when no field is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.age.is_none()
    }

    /// Evaluate the filter against a record held in memory.
    ///
    /// Storage-backed adapters translate the filter into their own query
    /// language instead.
    pub fn matches(&self, user: &User) -> bool {
        self.email
            .as_deref()
            .is_none_or(|email| user.email().as_ref() == email)
            && self
                .name
                .as_deref()
                .is_none_or(|name| user.name().as_ref() == name)
            && self
                .age
                .as_ref()
                .is_none_or(|age| age.matches(user.age().map(i32::from)))
    }
}
