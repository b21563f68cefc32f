//! Rule-based collection recommendations.
//!
//! Each rule that matches a forecast contributes one [`Recommendation`],
//! in rule order. Several rules can fire for the same forecast. Below 70
//! exactly one index band rule fires; from 70 up only the mode and signal
//! rules apply, so a quiet forecast there gets none.

use wpi_signal_models::{OperatingMode, Recommendation, RecommendationSignals};

/// Signal level above which a signal counts as active.
const ACTIVE: u32 = 50;

/// Signals that must be active at once for a multi-signal alert.
const CONVERGING_SIGNALS: usize = 3;

/// Returns every recommendation whose rule matches the dashboard index
/// `wpi`, the rule-engine `signals`, and the operating `mode`.
#[must_use]
pub fn recommend(
    wpi: u32,
    signals: &RecommendationSignals,
    mode: OperatingMode,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let mut push = |matched: bool, action: &str, reason: &str, score: u32| {
        if matched {
            out.push(Recommendation {
                action: action.to_string(),
                reason: reason_text(reason, signals, wpi),
                actionability_score: score,
            });
        }
    };

    push(
        wpi >= 85 && signals.spike_flag,
        "IMMEDIATE RESPONSE: Deploy additional crews for emergency pickup",
        "Critical WPI (85+) with active spike",
        95,
    );
    push(
        mode == OperatingMode::Event && wpi >= 70,
        "URGENT: Increase frequency during event period (hourly or bi-hourly)",
        "Event mode with high WPI (70+)",
        90,
    );
    push(
        mode == OperatingMode::Emergency && wpi >= 75,
        "EMERGENCY PROTOCOL: Coordinate with disaster management & health teams",
        "Emergency mode with high WPI (75+)",
        92,
    );
    push(
        signals.weather_alert > ACTIVE,
        "ALERT RESPONSE: Monitor closely & increase vigilance for health risks",
        "Active weather/health alert signal",
        85,
    );
    push(
        signals.hotspot_history > ACTIVE && wpi >= 50,
        "HOTSPOT ZONE: Implement preventive measures & increase frequency",
        "Identified hotspot with moderate-high WPI",
        75,
    );
    push(
        (50..70).contains(&wpi),
        "STANDARD: Increase pickup frequency to twice daily",
        "Moderate WPI requiring attention",
        60,
    );
    push(
        (30..50).contains(&wpi),
        "ROUTINE: Maintain standard daily pickup schedule",
        "Low-moderate WPI - routine operations",
        40,
    );
    push(
        wpi < 30,
        "MINIMAL: Standard weekly schedule sufficient",
        "Very low WPI - minimal intervention needed",
        20,
    );
    push(
        signals.event_presence > 70,
        "EVENT PREP: Pre-position crews near event venue for rapid response",
        "Active/high-presence event in zone",
        80,
    );

    let active = [
        signals.complaint_intensity > ACTIVE,
        signals.event_presence > ACTIVE,
        signals.weather_alert > ACTIVE,
        signals.spike_flag,
    ]
    .into_iter()
    .filter(|&on| on)
    .count();
    push(
        active >= CONVERGING_SIGNALS,
        "MULTI-SIGNAL ALERT: Coordinate across teams for integrated response",
        &format!("Multiple converging signals ({active} active)"),
        88,
    );

    out
}

fn reason_text(reason: &str, signals: &RecommendationSignals, wpi: u32) -> String {
    let mut factors = Vec::new();
    if signals.complaint_intensity > ACTIVE {
        factors.push(format!(
            "High complaint intensity ({})",
            signals.complaint_intensity
        ));
    }
    if signals.event_presence > ACTIVE {
        factors.push(format!(
            "Event presence detected ({})",
            signals.event_presence
        ));
    }
    if signals.weather_alert > ACTIVE {
        factors.push(format!(
            "Weather/health alert active ({})",
            signals.weather_alert
        ));
    }
    if signals.hotspot_history > ACTIVE {
        factors.push("Zone identified as hotspot".to_string());
    }
    if signals.spike_flag {
        factors.push("Complaint spike detected".to_string());
    }

    let breakdown = if factors.is_empty() {
        "No major signal triggers.".to_string()
    } else {
        format!("Contributing factors: {}.", factors.join(", "))
    };

    format!("{reason}. WPI Score: {wpi}. {breakdown}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: RecommendationSignals = RecommendationSignals {
        complaint_intensity: 40,
        event_presence: 0,
        weather_alert: 30,
        hotspot_history: 30,
        spike_flag: false,
    };

    const FESTIVAL_PEAK: RecommendationSignals = RecommendationSignals {
        complaint_intensity: 100,
        event_presence: 90,
        weather_alert: 80,
        hotspot_history: 70,
        spike_flag: true,
    };

    fn scores(wpi: u32, signals: &RecommendationSignals, mode: OperatingMode) -> Vec<u32> {
        recommend(wpi, signals, mode)
            .iter()
            .map(|r| r.actionability_score)
            .collect()
    }

    #[test]
    fn index_bands_pick_one_schedule() {
        assert_eq!(scores(0, &QUIET, OperatingMode::Normal), vec![20]);
        assert_eq!(scores(29, &QUIET, OperatingMode::Normal), vec![20]);
        assert_eq!(scores(30, &QUIET, OperatingMode::Normal), vec![40]);
        assert_eq!(scores(49, &QUIET, OperatingMode::Normal), vec![40]);
        assert_eq!(scores(50, &QUIET, OperatingMode::Normal), vec![60]);
        assert_eq!(scores(69, &QUIET, OperatingMode::Normal), vec![60]);
        assert!(scores(70, &QUIET, OperatingMode::Normal).is_empty());
    }

    #[test]
    fn critical_spike() {
        let spiking = RecommendationSignals {
            spike_flag: true,
            ..QUIET
        };
        assert_eq!(scores(85, &spiking, OperatingMode::Normal), vec![95]);
        assert!(scores(84, &spiking, OperatingMode::Normal).is_empty());
        assert!(scores(85, &QUIET, OperatingMode::Normal).is_empty());
    }

    #[test]
    fn event_mode_urgency() {
        assert_eq!(scores(70, &QUIET, OperatingMode::Event), vec![90]);
        assert_eq!(scores(69, &QUIET, OperatingMode::Event), vec![60]);
        assert!(scores(70, &QUIET, OperatingMode::Emergency).is_empty());
    }

    #[test]
    fn emergency_protocol() {
        assert_eq!(scores(75, &QUIET, OperatingMode::Emergency), vec![92]);
        assert!(scores(74, &QUIET, OperatingMode::Emergency).is_empty());
        assert!(scores(75, &QUIET, OperatingMode::Normal).is_empty());
    }

    #[test]
    fn weather_alert() {
        let stormy = RecommendationSignals {
            weather_alert: 51,
            ..QUIET
        };
        assert_eq!(scores(10, &stormy, OperatingMode::Normal), vec![85, 20]);
        let borderline = RecommendationSignals {
            weather_alert: 50,
            ..QUIET
        };
        assert_eq!(scores(10, &borderline, OperatingMode::Normal), vec![20]);
    }

    #[test]
    fn hotspot_needs_moderate_index() {
        let hotspot = RecommendationSignals {
            hotspot_history: 70,
            ..QUIET
        };
        assert_eq!(scores(50, &hotspot, OperatingMode::Normal), vec![75, 60]);
        assert_eq!(scores(49, &hotspot, OperatingMode::Normal), vec![40]);
    }

    #[test]
    fn event_prep() {
        let crowded = RecommendationSignals {
            event_presence: 71,
            ..QUIET
        };
        assert_eq!(scores(40, &crowded, OperatingMode::Normal), vec![40, 80]);
        let busy = RecommendationSignals {
            event_presence: 70,
            ..QUIET
        };
        assert_eq!(scores(40, &busy, OperatingMode::Normal), vec![40]);
    }

    #[test]
    fn multi_signal_alert_needs_three() {
        let two = RecommendationSignals {
            complaint_intensity: 60,
            event_presence: 60,
            ..QUIET
        };
        assert_eq!(scores(40, &two, OperatingMode::Normal), vec![40]);

        let three = RecommendationSignals {
            spike_flag: true,
            ..two
        };
        let recs = recommend(40, &three, OperatingMode::Normal);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].actionability_score, 88);
        assert!(
            recs[1]
                .reason
                .starts_with("Multiple converging signals (3 active). WPI Score: 40.")
        );
    }

    #[test]
    fn festival_peak_fires_in_rule_order() {
        assert_eq!(
            scores(100, &FESTIVAL_PEAK, OperatingMode::Event),
            vec![95, 90, 85, 75, 80, 88]
        );
        assert_eq!(
            scores(100, &FESTIVAL_PEAK, OperatingMode::Emergency),
            vec![95, 92, 85, 75, 80, 88]
        );
    }

    #[test]
    fn reason_lists_contributing_factors() {
        let recs = recommend(100, &FESTIVAL_PEAK, OperatingMode::Normal);
        assert_eq!(
            recs[0].reason,
            "Critical WPI (85+) with active spike. WPI Score: 100. Contributing factors: \
             High complaint intensity (100), Event presence detected (90), \
             Weather/health alert active (80), Zone identified as hotspot, \
             Complaint spike detected."
        );
        assert_eq!(
            recs[0].action,
            "IMMEDIATE RESPONSE: Deploy additional crews for emergency pickup"
        );
    }

    #[test]
    fn reason_without_triggers() {
        let recs = recommend(12, &QUIET, OperatingMode::Normal);
        assert_eq!(
            recs[0].reason,
            "Very low WPI - minimal intervention needed. WPI Score: 12. No major signal triggers."
        );
    }
}
