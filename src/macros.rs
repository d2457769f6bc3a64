/// Lazily compiled, process-wide regex. Accepts a literal or a `concat!` of
/// pattern fragments.
#[macro_export]
macro_rules! regex {
    ($pat:expr) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declares one entry of the ordered rule table.
///
/// ```ignore
/// rule! {
///     name: "named_month",
///     buckets: BucketMask::MONTHISH.bits(),
///     suppressed_by: ["month_interval", "month_thirds"],
///     matcher: date::match_named_month,
/// }
/// ```
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr
        $(, optional_phrases: [ $($opt_phrase:expr),* $(,)? ])?
        $(, buckets: $buckets:expr)?
        $(, suppressed_by: [ $($suppressor:expr),* $(,)? ])?
        , matcher: $matcher:expr
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            matcher: $matcher,
            optional_phrases: &[ $($($opt_phrase),*)? ],
            buckets: { 0 $(| $buckets)? },
            suppressed_by: &[ $($($suppressor),*)? ],
        }
    }};
}
