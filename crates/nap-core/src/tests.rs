//! Unit tests for nap-core primitives.

#[cfg(test)]
mod ids {
    use crate::NapId;

    #[test]
    fn next_increments() {
        assert_eq!(NapId::FIRST.next(), NapId(2));
        assert_eq!(NapId(u32::MAX).next(), NapId(u32::MAX));
    }

    #[test]
    fn ordering() {
        assert!(NapId(1) < NapId(2));
    }

    #[test]
    fn display() {
        assert_eq!(NapId(7).to_string(), "NapId(7)");
    }
}

#[cfg(test)]
mod time_of_day {
    use crate::{CoreError, TimeOfDay};

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn parses_padded_and_unpadded_hours() {
        assert_eq!(t("07:05").minutes(), 425);
        assert_eq!(t("7:05").minutes(), 425);
        assert_eq!(t(" 23:59 ").minutes(), 1_439);
        assert_eq!(t("00:00"), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "7", "7:5", "24:00", "12:60", "ab:cd", "-1:30", "12:30:00", "123:00"] {
            assert!(
                matches!(bad.parse::<TimeOfDay>(), Err(CoreError::InvalidTime(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(TimeOfDay::from_hm(5, 3).unwrap().to_string(), "05:03");
    }

    #[test]
    fn from_minutes_wraps_both_directions() {
        assert_eq!(TimeOfDay::from_minutes(-30).to_string(), "23:30");
        assert_eq!(TimeOfDay::from_minutes(1_440 + 75).to_string(), "01:15");
        assert_eq!(TimeOfDay::from_minutes(-1_440 * 3).to_string(), "00:00");
    }

    #[test]
    fn add_minutes_crosses_midnight() {
        assert_eq!(t("23:00").add_minutes(90).to_string(), "00:30");
        assert_eq!(t("00:30").add_minutes(-90).to_string(), "23:00");
    }

    #[test]
    fn minutes_until_assumes_forward() {
        assert_eq!(t("10:00").minutes_until(t("11:30")), 90);
        assert_eq!(t("23:30").minutes_until(t("00:15")), 45);
        assert_eq!(t("10:00").minutes_until(t("10:00")), 0);
    }
}

#[cfg(test)]
mod string_helpers {
    use crate::{add_minutes, duration_between, minutes_to_time, time_to_minutes, CoreError};

    #[test]
    fn blank_is_midnight() {
        assert_eq!(time_to_minutes(""), Ok(0));
        assert_eq!(time_to_minutes("   "), Ok(0));
    }

    #[test]
    fn malformed_is_an_error() {
        assert!(matches!(time_to_minutes("noon"), Err(CoreError::InvalidTime(_))));
    }

    #[test]
    fn minutes_to_time_normalizes() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(1_439), "23:59");
        assert_eq!(minutes_to_time(1_440), "00:00");
        assert_eq!(minutes_to_time(-1), "23:59");
    }

    #[test]
    fn add_minutes_composes() {
        assert_eq!(add_minutes("05:00", 360).unwrap(), "11:00");
        assert_eq!(add_minutes("01:00", -120).unwrap(), "23:00");
    }

    #[test]
    fn duration_wraps_past_midnight() {
        assert_eq!(duration_between("13:00", "14:30").unwrap(), 90);
        assert_eq!(duration_between("23:50", "00:20").unwrap(), 30);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::{add_minutes, duration_between, minutes_to_time, time_to_minutes};

    proptest! {
        #[test]
        fn round_trip(h in 0u32..24, m in 0u32..60) {
            let s = format!("{h:02}:{m:02}");
            prop_assert_eq!(minutes_to_time(time_to_minutes(&s).unwrap() as i64), s);
        }

        #[test]
        fn wraparound_duration(h in 0u32..24, m in 0u32..60, d in 1i64..1_440) {
            let t = format!("{h:02}:{m:02}");
            let later = add_minutes(&t, d).unwrap();
            prop_assert_eq!(duration_between(&t, &later).unwrap() as i64, d);
            prop_assert_eq!(duration_between(&later, &t).unwrap() as i64, 1_440 - d);
        }
    }
}
