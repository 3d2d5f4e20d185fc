//! ATCO area code handling.
//!
//! The first three characters of an ATCO code identify the administrative
//! area that issued it, and the API is queried by area.

use std::collections::BTreeSet;

/// Length of an ATCO area prefix.
const AREA_CODE_LEN: usize = 3;

/// Reduce stop or area codes to the API's `atcoAreaCodes` parameter.
///
/// Each code is cut to its first three characters and left-padded with
/// zeros, so `"68"` and `"068000000322"` both give `"068"`. The result is
/// de-duplicated, sorted and comma-joined.
///
/// # Examples
///
/// ```
/// use naptan::domain::format_area_codes;
///
/// assert_eq!(
///     format_area_codes(["2500DCL4060", "1100DEA10139", "068000000322"]),
///     "068,110,250"
/// );
/// assert_eq!(format_area_codes(["250", "110", "68"]), "068,110,250");
/// assert_eq!(format_area_codes(Vec::<String>::new()), "");
/// ```
pub fn format_area_codes<I, S>(codes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let areas: BTreeSet<String> = codes
        .into_iter()
        .map(|code| area_prefix(code.as_ref()))
        .collect();
    areas.into_iter().collect::<Vec<_>>().join(",")
}

/// The zero-padded three-character area prefix of one code.
pub fn area_prefix(code: &str) -> String {
    let prefix: String = code.chars().take(AREA_CODE_LEN).collect();
    format!("{prefix:0>width$}", width = AREA_CODE_LEN)
}
