//! Pattern table.
//!
//! Every regular expression the matchers and the structure splitter use lives
//! here. Patterns run on lower-cased text; accented and plain spellings are
//! both accepted. The `regex` crate has no look-around, so the few places that
//! need it (e.g. "hét" not followed by "fő") are post-checked in the matcher.

use regex::Regex;

// Fragments shared between patterns. These expand to string literals so they
// can be spliced with `concat!`.
macro_rules! month_name {
    () => {
        r"jan(?:u[aá]r|\.|\b)|feb(?:ru[aá]r|r\.|\.|r\b|\b)|m[aá]rc(?:ius|\.|\b)|[aá]pr(?:ilis|\.|\b)|m[aá]j(?:us|\.|\b)|j[uú]n(?:ius|\.|\b)|j[uú]l(?:ius|\.|\b)|aug(?:usztus|\.|\b)|szep(?:tember|t\.|t\b|\.|\b)|okt(?:[oó]ber|\.|\b)|nov(?:ember|\.|\b)|dec(?:ember|\.|\b)"
    };
}

macro_rules! weekday_name {
    () => {
        r"h[eé]tf[oő]|kedd|szerd[aá]|cs[uü]t[oö]rt[oö]k|p[eé]ntek|szombat|vas[aá]rnap"
    };
}

macro_rules! daypart_name {
    () => {
        r"hajnal|reggel|d[eé]lel[oőö]tt|d[eé]lut[aá]n|est(?:e|é|ig)|[eé]jjel|[eé]jszak"
    };
}

macro_rules! hour_word {
    () => {
        r"tizenegy|tizenkett[oöő]|tizenk[eé]t|tizenh[aá]rom|tizenn[eé]gy|tizen[oö]t|tizenhat|tizenh[eé]t|tizennyolc|tizenkilenc|t[ií]z|huszonegy|huszonkett[oöő]|huszonk[eé]t|huszonh[aá]rom|huszonn[eé]gy|h[uú]sz|nulla|egy|kett[oöő]|k[eé]t|h[aá]rom|n[eé]gy|[oö]t|hat|h[eé]t|nyolc|kilenc|\d{1,2}"
    };
}

// Cardinal day numbers 1..31 as words; "két" only ever precedes a noun.
macro_rules! day_word {
    () => {
        r"harmincegy|harminc|huszon(?:egy|kett[oöő]|h[aá]rom|n[eé]gy|[oö]t|hat|h[eé]t|nyolc|kilenc)|h[uú]sz|tizen(?:egy|kett[oöő]|h[aá]rom|n[eé]gy|[oö]t|hat|h[eé]t|nyolc|kilenc)|t[ií]z|egy|kett[oöő]|h[aá]rom|n[eé]gy|[oö]t|hat|h[eé]t|nyolc|kilenc"
    };
}

macro_rules! quarter_word {
    () => {
        r"h[aá]romnegyed|negyed|f[eé]l"
    };
}

macro_rules! day_suffix {
    () => {
        r"(?:[aáeé](?:n|t[oóöő]l|ig|i|kor|t)?|i)"
    };
}

macro_rules! duration_unit {
    () => {
        r"(?:nap(?:ra|ig|os)|h[eé]t(?:re|ig)|hetes|h[oó]nap(?:ra|ig|os)|[eé]v(?:re|ig|es))"
    };
}

// --- Day-level -----------------------------------------------------------------

pub(crate) fn iso_date() -> &'static Regex {
    regex!(
        r"\b(?:(3[01]|[12][0-9]|0?[1-9])[-/.](1[0-2]|0?[1-9])[-/.]([0-9]{4})|([0-9]{4})(?:[-/. ](1[0-2]|0?[1-9])\b(?:[-/. ](3[01]|[12][0-9]|0?[1-9])\b)?)?)\b"
    )
}

pub(crate) fn named_month() -> &'static Regex {
    regex!(concat!(
        r"(?:\b(j[oö]v[oő](?:re)?|tavaly)(?:\s+[eé]v\w*)?\s+)?\b(",
        month_name!(),
        r")(?:\s+(\d{1,2}|",
        day_word!(),
        r")\b)?"
    ))
}

pub(crate) fn relative_day() -> &'static Regex {
    regex!(r"\b(holnaput[aá]n|holnap|tegnapel[oő]tt|tegnap|mai nap|m[aá]t[oó]l|m[aá]r[aá]\b|ma\b)")
}

pub(crate) fn weekday() -> &'static Regex {
    regex!(concat!(r"(?:\b(el[oő]z[oő]|m[uú]lt|ezen|j[oö]v[oő])\b[^,;.]*?)?\b(", weekday_name!(), r")"))
}

pub(crate) fn week() -> &'static Regex {
    regex!(r"\b(el[oő]z[oő] h[eé]t|m[uú]lt ?h[eé]t|ez(?:en)?(?: a)? ?h[eé]t|j[oö]v[oő] ?h[eé]t)")
}

pub(crate) fn year_word() -> &'static Regex {
    regex!(r"\b(tavalyel[oő]tt|tavaly|id[eé]n\b|j[oö]v[oő]re\b)")
}

pub(crate) fn years_from_now() -> &'static Regex {
    regex!(r"\b(\w+) [eé]v m[uú]lva")
}

pub(crate) fn years_ago() -> &'static Regex {
    regex!(r"\b(\w+) [eé]vvel (?:ezel[oő]tt|kor[aá]bban)")
}

pub(crate) fn this_year() -> &'static Regex {
    regex!(r"\b(?:ett[oő]l az|ebben az|ezen az|ez az|idei) [eé]v\w*")
}

pub(crate) fn last_year() -> &'static Regex {
    regex!(r"\b(?:m[uú]lt|el[oő]z[oő]) [eé]v\w*")
}

pub(crate) fn next_year() -> &'static Regex {
    regex!(r"\bj[oö]v[oő] [eé]v\w*")
}

pub(crate) fn explicit_year() -> &'static Regex {
    regex!(r"\b[0-9]{4}\b|\btavaly|\bid[eé]n\b|\bj[oö]v[oő]re\b|\b[eé]v(?:ben|re|t[oóöő]l|ig)?\b")
}

pub(crate) fn relative_month() -> &'static Regex {
    regex!(
        r"\b(legut[oó]bbi|utols[oó]|m[uú]lt|el[oő]z[oő]|ut[oó]bbi|ezen|ebben|aktu[aá]lis|j[oö]v[oő]|k[oö]vetkezend[oő]|k[oö]vetkez[oő])(?: a)? h[oó]nap"
    )
}

pub(crate) fn periods_from_now() -> &'static Regex {
    regex!(r"\b(\w+) (perc|[oó]ra|nap|h[eé]t) m[uú]lva")
}

pub(crate) fn periods_before_now() -> &'static Regex {
    regex!(r"\b(\w+) (percc?el|[oó]r[aá]val|napp?al|h[eé]tt?el) (?:ezel[oő]tt|kor[aá]bban|kor[aá]bbi)")
}

pub(crate) fn in_past_periods() -> &'static Regex {
    regex!(
        r"\b(elm[uú]lt|megel[oő]z[oő]|el[oő]z[oő]) (\w+) (perc\w*|[oó]r[aá]\w*|h[oó]nap\w*|havi|nap\w*|h[eé]t\w*|heti|[eé]v\w*)"
    )
}

pub(crate) fn day_of_month_digits() -> &'static Regex {
    regex!(concat!(r"\b(3[01]|[12][0-9]|0?[1-9])-j?", day_suffix!(), r"\b"))
}

pub(crate) fn day_of_month_words() -> &'static Regex {
    regex!(concat!(
        r"\b(elsej|(?:tizen|huszon|harminc)?(?:egyed|ketted|m[aá]sod|harmad|negyed|[oö]t[oö]d|hatod|heted|nyolcad|kilenced)ik|tizedik|huszadik|harmincadik)",
        day_suffix!(),
        r"?\b"
    ))
}

pub(crate) fn month_interval() -> &'static Regex {
    regex!(concat!(
        r"\b(",
        month_name!(),
        r")\w*\.?\s+(\d{1,2})\.?(?:-?\w*t[oóöő]l\s+(?:eg[eé]szen\s+)?(\d{1,2})\.?-?\w*ig\b|\s*[-–]\s*(\d{1,2})\b)"
    ))
}

pub(crate) fn month_thirds() -> &'static Regex {
    regex!(concat!(r"\b(", month_name!(), r")\w*\.?\s+(elej|k[oö]zep|v[eé]g)"))
}

/// Duration part of a duration-anchored interval ("5 napig", "kéthetes").
pub(crate) fn date_offset() -> &'static Regex {
    regex!(r"\b(\d+|\w+?)\s?(h[oó]nap|nap|h[eé]t|het|[eé]v)(?:r[ae]|ig|[oe]s)\b")
}

// --- Clock-level -----------------------------------------------------------------

pub(crate) fn digital_clock() -> &'static Regex {
    regex!(r"\b([01]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?\b")
}

pub(crate) fn hour_h() -> &'static Regex {
    regex!(r"\b([01]?[0-9]|2[0-3]) ?h\b")
}

pub(crate) fn daypart() -> &'static Regex {
    regex!(concat!(r"\b(", daypart_name!(), r")"))
}

/// `[daypart] [quarter] HOUR [suffix | óra…] [[után|előtt] N perc…]`
pub(crate) fn clock_words() -> &'static Regex {
    regex!(concat!(
        r"(?:\b(",
        daypart_name!(),
        r")\w*\s+)?(?:\b(",
        quarter_word!(),
        r")\s+)?\b(",
        hour_word!(),
        r")(?:-?(kor|r[ae]|ig|t[oóöő]l)\b|\s?([oó]r[aá]\w*)|\b)(?:(?:\s+(ut[aá]n|el[oőö]tt))?\s+(\d{1,2}|\w+)\s+perc\w*)?"
    ))
}

/// `N perccel [daypart] [quarter] HOUR [suffix] után|előtt`
pub(crate) fn clock_words_reversed() -> &'static Regex {
    regex!(concat!(
        r"\b(\d{1,2}|\w+)\s+perc\w*\s+(?:(",
        daypart_name!(),
        r")\w*\s+)?(?:(",
        quarter_word!(),
        r")\s+)?\b(",
        hour_word!(),
        r")(?:-?kor|\s?[oó]r[aá]\w*)?\s+(ut[aá]n|el[oőö]tt)\b"
    ))
}

pub(crate) fn now_word() -> &'static Regex {
    regex!(r"\bmost\b")
}

/// A daypart word directly before the end of `text` ("este ", "ma reggel ").
pub(crate) fn daypart_word_before() -> &'static Regex {
    regex!(concat!(r"\b(", daypart_name!(), r")\w*\s+$"))
}

pub(crate) fn month_word_before(text: &str) -> bool {
    regex!(concat!(r"\b(?:", month_name!(), r")\w*\.?$")).is_match(text.trim_end())
}

// --- Structure ----------------------------------------------------------------

pub(crate) fn conjunction() -> &'static Regex {
    regex!(r"\b(?:vagy|és)\b")
}

pub(crate) fn clause_break() -> &'static Regex {
    regex!(r"[;!?()\[\]]|,\s")
}

pub(crate) fn labelled_interval() -> &'static Regex {
    regex!(
        r"^.*?kezd[oő]\s*(?:d[aá]tum|id[oő]pont)\s*:\s*(.*?)[\s,;]*\bv[eé]g(?:s[oő]|e|z[oő]d[eé]s)?\s*(?:d[aá]tum|id[oő]pont)\s*:\s*(.*?)\s*$"
    )
}

pub(crate) fn from_until() -> &'static Regex {
    regex!(r"^(.*t[oóöő]l\b)(.*?ig\b)")
}

pub(crate) fn range_ymd() -> &'static Regex {
    regex!(r"^(.*?\b[0-9]{4}[-/.][0-9]{1,2}[-/.][0-9]{1,2})\.?\s*[-–]\s*([0-9]{4}[-/.][0-9]{1,2}[-/.][0-9]{1,2}.*)$")
}

pub(crate) fn range_ym() -> &'static Regex {
    regex!(r"^(.*?\b[0-9]{4}[-/.][0-9]{1,2})\.?\s*[-–]\s*([0-9]{4}[-/.][0-9]{1,2}\b.*)$")
}

pub(crate) fn range_md() -> &'static Regex {
    regex!(concat!(
        r"^(.*?\b(?:",
        month_name!(),
        r")\w*\.?\s+[0-9]{1,2}\.?)\s*[-–]\s*((?:",
        month_name!(),
        r").*)$"
    ))
}

pub(crate) fn range_y() -> &'static Regex {
    regex!(r"^(.*?\b[0-9]{4})\s*[-–]\s*([0-9]{4}\b.*)$")
}

pub(crate) fn range_m() -> &'static Regex {
    regex!(concat!(
        r"^(.*?\b(?:",
        month_name!(),
        r")\w*\.?)\s*[-–]\s*((?:",
        month_name!(),
        r").*)$"
    ))
}

pub(crate) fn from_only() -> &'static Regex {
    regex!(r"^([^,;]*(?:t[oóöő]l|\s[oó]ta)\b)")
}

pub(crate) fn until_only() -> &'static Regex {
    regex!(r"^([^,;]*?ig\b)")
}

pub(crate) fn from_then_duration() -> &'static Regex {
    regex!(concat!(r"^(.*t[oóöő]l)\b(.*?", duration_unit!(), r")\b"))
}

pub(crate) fn duration_then_from() -> &'static Regex {
    regex!(concat!(r"^(.*?", duration_unit!(), r")\b(.*t[oóöő]l)\b"))
}

// --- Durations ----------------------------------------------------------------
//
// Run on accent-folded text.

/// "1 óra 25 perc", "egy óra 10 percre".
pub(crate) fn hours_and_minutes() -> &'static Regex {
    regex!(r"\b(\d{1,2}|\w+?)\s?ora\w*\s+(\d{1,3}|\w+?)\s?perc\w*")
}

/// "negyed óra", "másfélórát", "1 és negyed óráig", "3 negyedóra".
pub(crate) fn quarter_hours() -> &'static Regex {
    regex!(r"\b(?:(\d{1,2}|\w+?)\s+(es\s+)?)?(haromnegyed|negyed|masfel|fel)\s?ora\w*")
}

/// "3 órára", "1,5 óráig", "két óra".
pub(crate) fn hours() -> &'static Regex {
    regex!(r"\b(\d{1,2}(?:,5)?|\w+?)\s?ora\w*")
}

pub(crate) fn minutes() -> &'static Regex {
    regex!(r"\b(\d{1,3}|\w+?)\s?perc\w*")
}

pub(crate) fn days() -> &'static Regex {
    regex!(r"\b(\d{1,3}|\w+?)\s?nap(?:ra|ig|os|ot)?\b")
}

/// "2 hétre", "kéthetes".
pub(crate) fn weeks() -> &'static Regex {
    regex!(r"\b(\d{1,2}|\w+?)\s?het(?:re|ig|es|et)\b")
}

/// Words ending in "-ig"/"-tól" that never close or open a date interval.
pub(crate) const NON_TEMPORAL_BOUNDARY_WORDS: &[&str] =
    &["mindig", "addig", "eddig", "meddig", "ameddig", "végig", "sokáig", "attól", "ettől", "amitől", "akitől"];

// Units that turn a 4-digit number into a quantity rather than a year.
pub(crate) const QUANTITY_UNITS: &[&str] = &[
    "forint", "ft", "huf", "eur", "euró", "euro", "dollár", "dollar", "usd", "db", "darab", "fok", "fő", "ember", "km",
    "kg", "méter", "meter", "liter", "százalék", "szazalek", "%", "perc", "óra", "ora", "oldal", "lépés", "pont",
];
