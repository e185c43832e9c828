#![forbid(unsafe_code)]

//! The stock five-entry demo deck.

use showreel_core::{FeatureDeck, FeatureEntry};

/// Build the demo deck. Panics are impossible: the entries are static
/// and valid by construction.
#[must_use]
pub fn sample_deck() -> FeatureDeck {
    FeatureDeck::new(vec![
        FeatureEntry::new(1, "Feature No.1 -", "TEXT HEADING DISPLAY")
            .bullet("Lorem ipsum dolor: sit amet consectetur adipiscing elit.")
            .bullet("Ut enim minim: veniam quis nostrud exercitation ullamco.")
            .bullet("Sed ut perspiciatis: unde omnis iste natus error sit.")
            .image("/iphone.jpg"),
        FeatureEntry::new(2, "Feature No.2 -", "ADVANCED ANALYTICS")
            .bullet("Real-time data processing: monitor your metrics instantly.")
            .bullet("Custom dashboard creation: build personalized views.")
            .bullet("Export functionality: generate reports in multiple formats.")
            .image("/iphone.jpg"),
        FeatureEntry::new(3, "Feature No.3 -", "SMART NOTIFICATIONS")
            .bullet("Intelligent alerts: notifications based on your preferences.")
            .bullet("Multi-channel delivery: email, SMS, or push.")
            .bullet("Custom triggers: automated alerts for specific events.")
            .image("/iphone.jpg"),
        FeatureEntry::new(4, "Feature No.4 -", "SECURE INTEGRATION")
            .bullet("End-to-end encryption: industry-standard security protocols.")
            .bullet("API connectivity: integrate with your existing tools.")
            .bullet("Single sign-on: one secure authentication method.")
            .image("/iphone.jpg"),
        FeatureEntry::new(5, "Feature No.5 -", "COLLABORATIVE WORKSPACE")
            .bullet("Team management: invite members and assign roles.")
            .bullet("Real-time collaboration: live editing capabilities.")
            .bullet("Version control: track changes and maintain history.")
            .image("/iphone.jpg"),
    ])
    .expect("static demo deck is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_deck_has_five_entries() {
        let deck = sample_deck();
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.get(4).unwrap().id(), 5);
    }
}
