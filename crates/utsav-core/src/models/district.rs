//! The fixed set of Telangana districts used to classify submissions.
//!
//! Districts are the only accepted grouping; client-submitted names are
//! re-validated server-side against this enum and never trusted as-is.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// A Telangana district. Variants are declared in canonical order; use
/// [`District::sorted_names`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum District {
    Adilabad,
    BhadradriKothagudem,
    Hanamkonda,
    Hyderabad,
    Jagtial,
    Jangaon,
    JayashankarBhupalpally,
    JogulambaGadwal,
    Kamareddy,
    Karimnagar,
    Khammam,
    KumuramBheemAsifabad,
    Mahabubabad,
    Mahabubnagar,
    Mancherial,
    Medak,
    MedchalMalkajgiri,
    Mulugu,
    Nagarkurnool,
    Nalgonda,
    Narayanpet,
    Nirmal,
    Nizamabad,
    Peddapalli,
    RajannaSircilla,
    Rangareddy,
    Sangareddy,
    Siddipet,
    Suryapet,
    Vikarabad,
    Wanaparthy,
    Warangal,
    YadadriBhuvanagiri,
}

const ALL_DISTRICTS: [District; 33] = [
    District::Adilabad,
    District::BhadradriKothagudem,
    District::Hanamkonda,
    District::Hyderabad,
    District::Jagtial,
    District::Jangaon,
    District::JayashankarBhupalpally,
    District::JogulambaGadwal,
    District::Kamareddy,
    District::Karimnagar,
    District::Khammam,
    District::KumuramBheemAsifabad,
    District::Mahabubabad,
    District::Mahabubnagar,
    District::Mancherial,
    District::Medak,
    District::MedchalMalkajgiri,
    District::Mulugu,
    District::Nagarkurnool,
    District::Nalgonda,
    District::Narayanpet,
    District::Nirmal,
    District::Nizamabad,
    District::Peddapalli,
    District::RajannaSircilla,
    District::Rangareddy,
    District::Sangareddy,
    District::Siddipet,
    District::Suryapet,
    District::Vikarabad,
    District::Wanaparthy,
    District::Warangal,
    District::YadadriBhuvanagiri,
];

impl District {
    /// All districts in canonical order.
    pub fn all() -> &'static [District] {
        &ALL_DISTRICTS
    }

    /// Canonical display name. Also used as the local storage directory and
    /// the remote archive folder name for this district.
    pub fn as_str(&self) -> &'static str {
        match self {
            District::Adilabad => "Adilabad",
            District::BhadradriKothagudem => "Bhadradri Kothagudem",
            District::Hanamkonda => "Hanamkonda",
            District::Hyderabad => "Hyderabad",
            District::Jagtial => "Jagtial",
            District::Jangaon => "Jangaon",
            District::JayashankarBhupalpally => "Jayashankar Bhupalpally",
            District::JogulambaGadwal => "Jogulamba Gadwal",
            District::Kamareddy => "Kamareddy",
            District::Karimnagar => "Karimnagar",
            District::Khammam => "Khammam",
            District::KumuramBheemAsifabad => "Kumuram Bheem Asifabad",
            District::Mahabubabad => "Mahabubabad",
            District::Mahabubnagar => "Mahabubnagar",
            District::Mancherial => "Mancherial",
            District::Medak => "Medak",
            District::MedchalMalkajgiri => "Medchal-Malkajgiri",
            District::Mulugu => "Mulugu",
            District::Nagarkurnool => "Nagarkurnool",
            District::Nalgonda => "Nalgonda",
            District::Narayanpet => "Narayanpet",
            District::Nirmal => "Nirmal",
            District::Nizamabad => "Nizamabad",
            District::Peddapalli => "Peddapalli",
            District::RajannaSircilla => "Rajanna Sircilla",
            District::Rangareddy => "Rangareddy",
            District::Sangareddy => "Sangareddy",
            District::Siddipet => "Siddipet",
            District::Suryapet => "Suryapet",
            District::Vikarabad => "Vikarabad",
            District::Wanaparthy => "Wanaparthy",
            District::Warangal => "Warangal",
            District::YadadriBhuvanagiri => "Yadadri Bhuvanagiri",
        }
    }

    /// Resolve a client-submitted name to a district. Matching is
    /// case-insensitive on the trimmed canonical name; anything else is
    /// rejected.
    pub fn from_name(name: &str) -> Option<District> {
        let trimmed = name.trim();
        ALL_DISTRICTS
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
    }

    /// District names sorted for display in selection UIs.
    pub fn sorted_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = ALL_DISTRICTS.iter().map(|d| d.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for District {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for District {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistrictVisitor;

        impl Visitor<'_> for DistrictVisitor {
            type Value = District;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Telangana district name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<District, E> {
                District::from_name(value)
                    .ok_or_else(|| E::custom(format!("unknown district: {}", value)))
            }
        }

        deserializer.deserialize_str(DistrictVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_districts_count() {
        assert_eq!(District::all().len(), 33);
    }

    #[test]
    fn test_from_name_exact() {
        assert_eq!(District::from_name("Hyderabad"), Some(District::Hyderabad));
        assert_eq!(
            District::from_name("Bhadradri Kothagudem"),
            Some(District::BhadradriKothagudem)
        );
    }

    #[test]
    fn test_from_name_case_insensitive_and_trimmed() {
        assert_eq!(District::from_name(" hyderabad "), Some(District::Hyderabad));
        assert_eq!(
            District::from_name("MEDCHAL-MALKAJGIRI"),
            Some(District::MedchalMalkajgiri)
        );
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(District::from_name("Mumbai"), None);
        assert_eq!(District::from_name(""), None);
    }

    #[test]
    fn test_sorted_names_are_sorted() {
        let names = District::sorted_names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 33);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&District::JogulambaGadwal).unwrap();
        assert_eq!(json, "\"Jogulamba Gadwal\"");
        let back: District = serde_json::from_str(&json).unwrap();
        assert_eq!(back, District::JogulambaGadwal);
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        let result: Result<District, _> = serde_json::from_str("\"Atlantis\"");
        assert!(result.is_err());
    }
}
