// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

pub mod aws;
mod request_builder;
pub mod segment;
pub mod transformer;
pub mod xray_request;

pub use request_builder::RequestBuilder;
pub use transformer::{ExportError, Transformer};
pub use xray_request::XRayRequestError;

#[derive(Debug, Error, PartialEq)]
#[error("unknown region: {0}")]
pub struct UnknownRegion(pub String);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Region {
    #[default]
    UsEast1,
    UsEast2,
    UsWest1,
    UsWest2,
    AfSouth1,
    ApEast1,
    ApSouth2,
    ApSoutheast3,
    ApSoutheast5,
    ApSoutheast4,
    ApSouth1,
    ApNortheast3,
    ApNortheast2,
    ApSoutheast1,
    ApSoutheast2,
    ApSoutheast7,
    ApNortheast1,
    CaCentral1,
    CaWest1,
    EuCentral1,
    EuWest1,
    EuWest2,
    EuSouth1,
    EuWest3,
    EuSouth2,
    EuNorth1,
    EuCentral2,
    IlCentral1,
    MxCentral1,
    MeSouth1,
    MeCentral1,
    SaEast1,
}

const REGIONS: [(Region, &str); 32] = [
    (Region::UsEast1, "us-east-1"),
    (Region::UsEast2, "us-east-2"),
    (Region::UsWest1, "us-west-1"),
    (Region::UsWest2, "us-west-2"),
    (Region::AfSouth1, "af-south-1"),
    (Region::ApEast1, "ap-east-1"),
    (Region::ApSouth2, "ap-south-2"),
    (Region::ApSoutheast3, "ap-southeast-3"),
    (Region::ApSoutheast5, "ap-southeast-5"),
    (Region::ApSoutheast4, "ap-southeast-4"),
    (Region::ApSouth1, "ap-south-1"),
    (Region::ApNortheast3, "ap-northeast-3"),
    (Region::ApNortheast2, "ap-northeast-2"),
    (Region::ApSoutheast1, "ap-southeast-1"),
    (Region::ApSoutheast2, "ap-southeast-2"),
    (Region::ApSoutheast7, "ap-southeast-7"),
    (Region::ApNortheast1, "ap-northeast-1"),
    (Region::CaCentral1, "ca-central-1"),
    (Region::CaWest1, "ca-west-1"),
    (Region::EuCentral1, "eu-central-1"),
    (Region::EuWest1, "eu-west-1"),
    (Region::EuWest2, "eu-west-2"),
    (Region::EuSouth1, "eu-south-1"),
    (Region::EuWest3, "eu-west-3"),
    (Region::EuSouth2, "eu-south-2"),
    (Region::EuNorth1, "eu-north-1"),
    (Region::EuCentral2, "eu-central-2"),
    (Region::IlCentral1, "il-central-1"),
    (Region::MxCentral1, "mx-central-1"),
    (Region::MeSouth1, "me-south-1"),
    (Region::MeCentral1, "me-central-1"),
    (Region::SaEast1, "sa-east-1"),
];

impl Region {
    pub fn as_str(&self) -> &'static str {
        REGIONS
            .iter()
            .find(|(region, _)| region == self)
            .map(|(_, name)| *name)
            .unwrap_or("us-east-1")
    }

    /// Public X-Ray API endpoint for this region
    pub fn endpoint(&self) -> String {
        format!("https://xray.{}.amazonaws.com", self)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGIONS
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(region, _)| *region)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

impl TryFrom<String> for Region {
    type Error = UnknownRegion;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_names_round_trip() {
        for (region, name) in REGIONS {
            assert_eq!(name, region.to_string());
            assert_eq!(Ok(region), name.parse::<Region>());
        }
    }

    #[test]
    fn unknown_region_is_an_error() {
        assert_eq!(
            Err(UnknownRegion("mars-north-1".to_string())),
            "mars-north-1".parse::<Region>()
        );
    }

    #[test]
    fn region_endpoint() {
        assert_eq!(
            "https://xray.eu-west-3.amazonaws.com",
            Region::EuWest3.endpoint()
        );
        assert_eq!(Region::UsEast1, Region::default());
    }

    #[test]
    fn region_deserializes_from_name() {
        let region: Region = serde_json::from_str("\"ap-southeast-2\"").unwrap();
        assert_eq!(Region::ApSoutheast2, region);
        assert!(serde_json::from_str::<Region>("\"nowhere\"").is_err());
    }
}
