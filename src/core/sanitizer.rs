use crate::domain::model::LookupKey;

/// Normalizes a raw zipcode from the request path into a lookup key.
///
/// Everything that is not an ASCII digit is dropped, so `"40010-000"` and
/// `" 40010 000 "` both become `40010000`. Input without digits yields an
/// empty key, which simply matches nothing downstream.
pub fn sanitize(raw: &str) -> LookupKey {
    LookupKey::from_digits(raw.chars().filter(char::is_ascii_digit).collect())
}
