//! Point tables for each scoring signal.

/// Name similarity band, gated by the length of the normalized organization name.
///
/// Short names get little or no reward because a handful of edits moves
/// their ratio a long way.
pub fn name_band_delta(score: Option<u8>, length: usize) -> i32 {
    let Some(score) = score else {
        return -10;
    };
    match score {
        100 if length < 5 => 0,
        100 => 5,
        90..=99 => match length {
            0..=4 => 0,
            5..=9 => 1,
            10..=14 => 2,
            _ => 5,
        },
        87..=89 => match length {
            0..=4 => -1,
            5..=9 => 1,
            10..=14 => 2,
            _ => 4,
        },
        _ => -7,
    }
}

/// Penalty for a patent filed before the company was incorporated.
pub fn plausibility_penalty(diff_years: f64) -> i32 {
    if diff_years >= 0.0 {
        0
    } else if diff_years >= -5.0 {
        -1
    } else if diff_years >= -10.0 {
        -3
    } else {
        -5
    }
}

/// Nearest-location distance band, in miles.
pub fn distance_delta(miles: f64) -> i32 {
    if miles < 50.0 {
        5
    } else if miles < 100.0 {
        2
    } else if miles < 200.0 {
        1
    } else {
        -2
    }
}

/// Date gap band. The signed difference is banded, so negative gaps take the top band.
pub fn magnitude_delta(diff_years: f64) -> i32 {
    if diff_years <= 15.0 {
        5
    } else if diff_years <= 25.0 {
        4
    } else if diff_years <= 30.0 {
        3
    } else if diff_years <= 35.0 {
        2
    } else {
        1
    }
}
