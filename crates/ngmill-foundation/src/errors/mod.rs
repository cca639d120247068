//! Conversions into [`NgError`](crate::NgError)

mod conversions;
