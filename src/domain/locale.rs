//! Region/location directory: where each physical service instance lives.

use std::fmt;

use rand::Rng;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One physical service instance. Its base URL serves send, fetch and delete traffic.
pub struct Location {
    name: String,
    base_url: String,
}

impl Location {
    /// Create a custom location. The base URL must be an absolute URL.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "location" });
        }
        let base_url = validate_base_url(base_url.into())?;
        Ok(Self { name, base_url })
    }

    fn known(name: &str, base_url: &str) -> Self {
        Self {
            name: name.to_owned(),
            base_url: base_url.to_owned(),
        }
    }

    pub fn frankfurt() -> Self {
        Self::known("FRANKFURT", "https://faxws.de1.retarus.com/rest/v1")
    }

    pub fn munich() -> Self {
        Self::known("MUNICH", "https://faxws.de2.retarus.com/rest/v1")
    }

    pub fn secaucus() -> Self {
        Self::known("SECAUCUS", "https://faxws.us2.retarus.com/rest/v1")
    }

    pub fn ashburn() -> Self {
        Self::known("ASHBURN", "https://faxws.us1.retarus.com/rest/v1")
    }

    pub fn zurich() -> Self {
        Self::known("ZURICH", "https://faxws.ch1.retarus.com/rest/v1")
    }

    pub fn singapore() -> Self {
        Self::known("SINGAPORE", "https://faxws.sg1.retarus.com/rest/v1")
    }

    /// All built-in locations.
    pub fn all() -> Vec<Self> {
        vec![
            Self::frankfurt(),
            Self::munich(),
            Self::secaucus(),
            Self::ashburn(),
            Self::zurich(),
            Self::singapore(),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A named set of locations behind one load-balanced send endpoint.
///
/// Invariant: at least one location.
pub struct Region {
    name: String,
    send_url: String,
    locations: Vec<Location>,
}

impl Region {
    pub fn new(
        name: impl Into<String>,
        send_url: impl Into<String>,
        locations: Vec<Location>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if locations.is_empty() {
            return Err(ValidationError::EmptyRegion { name });
        }
        let send_url = validate_base_url(send_url.into())?;
        Ok(Self {
            name,
            send_url,
            locations,
        })
    }

    fn known(name: &str, send_url: &str, locations: Vec<Location>) -> Self {
        Self {
            name: name.to_owned(),
            send_url: send_url.to_owned(),
            locations,
        }
    }

    pub fn europe() -> Self {
        Self::known(
            "EUROPE",
            "https://faxws-ha.de.retarus.com/rest/v1",
            vec![Location::frankfurt(), Location::munich()],
        )
    }

    pub fn usa() -> Self {
        Self::known(
            "USA",
            "https://faxws-ha.us.retarus.com/rest/v1",
            vec![Location::secaucus(), Location::ashburn()],
        )
    }

    pub fn asia() -> Self {
        Self::known(
            "ASIA",
            "https://faxws-ha.sg.retarus.com/rest/v1",
            vec![Location::singapore()],
        )
    }

    pub fn switzerland() -> Self {
        Self::known(
            "SWITZERLAND",
            "https://faxws-ha.ch.retarus.com/rest/v1",
            vec![Location::zurich()],
        )
    }

    /// All built-in regions.
    pub fn all() -> Vec<Self> {
        vec![Self::europe(), Self::usa(), Self::asia(), Self::switzerland()]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn send_url(&self) -> &str {
        &self.send_url
    }

    /// Locations in declared order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Pick one location uniformly at random. Repeated calls may return different locations.
    pub fn pick_location(&self) -> &Location {
        let idx = rand::rng().random_range(0..self.locations.len());
        &self.locations[idx]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Where a client sends its traffic: a whole region or one pinned location.
pub enum Locale {
    Region(Region),
    Location(Location),
}

impl Locale {
    /// Resolve a built-in name, case-insensitively; region names win over location names.
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        let wanted = name.trim();
        if let Some(region) = Region::all()
            .into_iter()
            .find(|region| region.name.eq_ignore_ascii_case(wanted))
        {
            return Ok(Self::Region(region));
        }
        Location::all()
            .into_iter()
            .find(|location| location.name.eq_ignore_ascii_case(wanted))
            .map(Self::Location)
            .ok_or_else(|| ValidationError::UnknownLocale {
                input: name.to_owned(),
            })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Region(region) => region.name(),
            Self::Location(location) => location.name(),
        }
    }

    /// Base URL for submitting fax jobs.
    pub fn send_url(&self) -> &str {
        match self {
            Self::Region(region) => region.send_url(),
            Self::Location(location) => location.base_url(),
        }
    }

    /// One location to read from or delete at; random within a region.
    pub fn fetch_location(&self) -> &Location {
        match self {
            Self::Region(region) => region.pick_location(),
            Self::Location(location) => location,
        }
    }

    pub fn fetch_url(&self) -> &str {
        self.fetch_location().base_url()
    }

    /// Every location covered by this locale, in declared order.
    pub fn locations(&self) -> &[Location] {
        match self {
            Self::Region(region) => region.locations(),
            Self::Location(location) => std::slice::from_ref(location),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::Region(Region::europe())
    }
}

impl From<Region> for Locale {
    fn from(value: Region) -> Self {
        Self::Region(value)
    }
}

impl From<Location> for Locale {
    fn from(value: Location) -> Self {
        Self::Location(value)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn validate_base_url(value: String) -> Result<String, ValidationError> {
    let parsed = url::Url::parse(value.trim())
        .map_err(|_| ValidationError::InvalidUrl { input: value.clone() })?;
    if parsed.cannot_be_a_base() {
        return Err(ValidationError::InvalidUrl { input: value });
    }
    Ok(value.trim().trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn built_in_regions_are_never_empty() {
        for region in Region::all() {
            assert!(!region.locations().is_empty(), "{region} has no locations");
        }
        let names: Vec<_> = Region::europe()
            .locations()
            .iter()
            .map(|l| l.name().to_owned())
            .collect();
        assert_eq!(names, vec!["FRANKFURT", "MUNICH"]);
    }

    #[test]
    fn custom_region_requires_locations_and_valid_urls() {
        let err = Region::new("EMPTY", "https://send.example.invalid", Vec::new()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyRegion { .. }));

        assert!(matches!(
            Location::new("BAD", "not a url"),
            Err(ValidationError::InvalidUrl { .. })
        ));

        let location = Location::new("LAB", "http://127.0.0.1:8080/rest/v1/").unwrap();
        assert_eq!(location.base_url(), "http://127.0.0.1:8080/rest/v1");
    }

    #[test]
    fn locale_resolves_regions_before_locations() {
        assert_eq!(Locale::from_name("europe").unwrap(), Locale::Region(Region::europe()));
        assert_eq!(
            Locale::from_name("Frankfurt").unwrap(),
            Locale::Location(Location::frankfurt())
        );
        assert_eq!(
            Locale::from_name("SWITZERLAND").unwrap(),
            Locale::Region(Region::switzerland())
        );
        assert!(matches!(
            Locale::from_name("atlantis"),
            Err(ValidationError::UnknownLocale { .. })
        ));
    }

    #[test]
    fn location_locale_is_a_list_of_one() {
        let locale = Locale::Location(Location::munich());
        assert_eq!(locale.locations(), &[Location::munich()]);
        assert_eq!(locale.send_url(), Location::munich().base_url());
        assert_eq!(locale.fetch_url(), Location::munich().base_url());
    }

    #[test]
    fn region_fetch_pick_stays_within_region() {
        let region = Region::europe();
        let locale = Locale::Region(region.clone());
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let picked = locale.fetch_location().clone();
            assert!(region.locations().contains(&picked));
            seen.insert(picked.name().to_owned());
        }
        // 200 uniform picks over two locations hit both with overwhelming probability.
        assert_eq!(seen.len(), 2);
        assert_ne!(locale.send_url(), locale.fetch_url());
    }
}
