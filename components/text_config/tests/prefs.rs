/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use text_config::pref;
use text_config::prefs::{self, PrefError, PrefValue};

// The global preferences are shared by every test in this binary, so all the
// mutations happen in one test.
#[test]
fn test_global_preferences() {
    assert!(pref!(layout_text_fixed_pitch_breaking_enabled));

    prefs::set_pref(
        "layout.text.fixed_pitch_breaking.enabled",
        PrefValue::Bool(false),
    )
    .expect("known boolean preference");
    assert!(!pref!(layout_text_fixed_pitch_breaking_enabled));

    assert_eq!(
        prefs::reset_pref("layout.text.fixed_pitch_breaking.enabled").ok(),
        Some(PrefValue::Bool(true))
    );
    assert!(pref!(layout_text_fixed_pitch_breaking_enabled));

    prefs::add_user_prefs(r#"{"layout.text.bisection_seed_factor": 4}"#)
        .expect("valid preferences");
    assert_eq!(pref!(layout_text_bisection_seed_factor), 4);

    // An invalid entry leaves the preferences untouched.
    let result = prefs::add_user_prefs(
        r#"{"layout.text.bisection_seed_factor": 8, "layout.text.trailing_whitespace_measuring.enabled": 1}"#,
    );
    assert!(matches!(result, Err(PrefError::InvalidValue(_))));
    assert_eq!(pref!(layout_text_bisection_seed_factor), 4);
    assert!(pref!(layout_text_trailing_whitespace_measuring_enabled));

    prefs::reset_all_prefs();
    assert_eq!(pref!(layout_text_bisection_seed_factor), 2);
}
