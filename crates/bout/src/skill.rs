use std::f64::consts::E;

use storage::models::Boxer;

/// Fighting skill of a boxer:
/// `weight * name_length + reach / 10 + age_modifier`.
///
/// The name length counts characters. The age modifier is -1 under 25,
/// 0 from 25 to 35 inclusive and -2 above 35.
pub fn fighting_skill(boxer: &Boxer) -> f64 {
    let name_length = boxer.name().chars().count() as i128;
    // Widened so that no valid weight overflows before the float conversion
    let base = i128::from(boxer.weight()) * name_length;

    base as f64 + boxer.reach() / 10.0 + age_modifier(boxer.age()) as f64
}

fn age_modifier(age: i64) -> i64 {
    if age < 25 {
        -1
    } else if age > 35 {
        -2
    } else {
        0
    }
}

/// Logistic transform of the absolute skill gap. Always in `[0.5, 1.0]`.
pub fn win_probability(skill_1: f64, skill_2: f64) -> f64 {
    let delta = (skill_1 - skill_2).abs();
    1.0 / (1.0 + E.powf(-delta))
}
