//! Fixed five-sentence summary templates.
//!
//! Both templates are pure functions of `(festival_name, district)`; the
//! free-text story never feeds them. The Telugu text is a parallel
//! rendering of the same facts, not a translation of the English output.

use utsav_core::models::District;

/// English summary template.
pub fn english_summary(festival_name: &str, district: District) -> String {
    format!(
        "{festival} is a traditional festival celebrated in {district} district of Telangana, India.\n\n\
         This festival holds great cultural and religious significance for the local community.\n\n\
         Traditional rituals, prayers, and community participation mark the celebrations.\n\n\
         This festival showcases Telangana's rich cultural heritage and strengthens community bonds.\n\n\
         Local traditions and religious practices are observed during this important celebration.",
        festival = festival_name,
        district = district.as_str(),
    )
}

/// Telugu summary template.
pub fn telugu_summary(festival_name: &str, district: District) -> String {
    format!(
        "{festival} తెలంగాణలో {district} జిల్లాలో జరుపుకునే సాంప్రదాయ పండుగ.\n\n\
         ఈ పండుగ స్థానిక సమాజానికి గొప్ప సాంస్కృతిక మరియు మత ప్రాముఖ్యతను కలిగి ఉంది.\n\n\
         సాంప్రదాయ ఆచారాలు, ఆరాధనలు మరియు సమాజ పాల్గొనేతో జరుపుకుంటారు.\n\n\
         ఈ పండుగ తెలంగాణ సంపన్న సాంస్కృతిక వారసత్వాన్ని ప్రదర్శిస్తుంది మరియు సమాజ బంధాలను బలపరుస్తుంది.\n\n\
         స్థానిక సంప్రదాయాలు మరియు మత ఆచారాలు ఈ ముఖ్యమైన వేడుకలో పాటించబడతాయి.",
        festival = festival_name,
        district = district.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_template_substitution() {
        let summary = english_summary("Bonalu", District::Hyderabad);
        assert!(summary
            .contains("Bonalu is a traditional festival celebrated in Hyderabad district"));
        assert!(summary.contains("Telangana"));
    }

    #[test]
    fn test_telugu_template_substitution() {
        let summary = telugu_summary("Bonalu", District::Hyderabad);
        assert!(summary.starts_with("Bonalu తెలంగాణలో Hyderabad జిల్లాలో"));
    }

    #[test]
    fn test_templates_are_deterministic() {
        let a = english_summary("Bathukamma", District::Warangal);
        let b = english_summary("Bathukamma", District::Warangal);
        assert_eq!(a, b);

        let ta = telugu_summary("Bathukamma", District::Warangal);
        let tb = telugu_summary("Bathukamma", District::Warangal);
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_templates_have_five_sentences() {
        let summary = english_summary("Ugadi", District::Medak);
        assert_eq!(summary.split("\n\n").count(), 5);
        let telugu = telugu_summary("Ugadi", District::Medak);
        assert_eq!(telugu.split("\n\n").count(), 5);
    }
}
