//! Coordinate Reference System handling

use crate::errors::MaskResult;

/// Identifier for common coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM Zone (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Other EPSG code
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    32600 + *zone as u32
                } else {
                    32700 + *zone as u32
                }
            },
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    format!("UTM Zone {}N (EPSG:{})", zone, self.epsg_code())
                } else {
                    format!("UTM Zone {}S (EPSG:{})", zone, self.epsg_code())
                }
            },
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }

    /// Render the WKT definition for the `.prj` sidecar
    ///
    /// Known systems get a proper well-known text block; other EPSG
    /// codes have no local definition, so None is returned and the
    /// sidecar is skipped.
    pub fn wkt(&self) -> Option<String> {
        match self {
            CoordinateSystem::WGS84 => Some(
                "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
                 SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],\
                 PRIMEM[\"Greenwich\",0.0],\
                 UNIT[\"Degree\",0.0174532925199433]]".to_string()
            ),
            CoordinateSystem::WebMercator => Some(
                "PROJCS[\"WGS_1984_Web_Mercator_Auxiliary_Sphere\",\
                 GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
                 SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],\
                 PRIMEM[\"Greenwich\",0.0],\
                 UNIT[\"Degree\",0.0174532925199433]],\
                 PROJECTION[\"Mercator_Auxiliary_Sphere\"],\
                 PARAMETER[\"False_Easting\",0.0],\
                 PARAMETER[\"False_Northing\",0.0],\
                 PARAMETER[\"Central_Meridian\",0.0],\
                 PARAMETER[\"Standard_Parallel_1\",0.0],\
                 PARAMETER[\"Auxiliary_Sphere_Type\",0.0],\
                 UNIT[\"Meter\",1.0]]".to_string()
            ),
            CoordinateSystem::UTM(zone, is_northern) => {
                let hemisphere = if *is_northern { "N" } else { "S" };
                let central_meridian = -183.0 + 6.0 * (*zone as f64);
                let false_northing = if *is_northern { 0.0 } else { 10000000.0 };
                Some(format!(
                    "PROJCS[\"WGS_1984_UTM_Zone_{}{}\",\
                     GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
                     SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],\
                     PRIMEM[\"Greenwich\",0.0],\
                     UNIT[\"Degree\",0.0174532925199433]],\
                     PROJECTION[\"Transverse_Mercator\"],\
                     PARAMETER[\"False_Easting\",500000.0],\
                     PARAMETER[\"False_Northing\",{:.1}],\
                     PARAMETER[\"Central_Meridian\",{:.1}],\
                     PARAMETER[\"Scale_Factor\",0.9996],\
                     PARAMETER[\"Latitude_Of_Origin\",0.0],\
                     UNIT[\"Meter\",1.0]]",
                    zone, hemisphere, false_northing, central_meridian
                ))
            },
            CoordinateSystem::Other(_) => None,
        }
    }
}

/// Factory for creating coordinate systems
pub struct CoordinateSystemFactory;

impl CoordinateSystemFactory {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> MaskResult<CoordinateSystem> {
        match epsg {
            4326 => Ok(CoordinateSystem::WGS84),
            3857 => Ok(CoordinateSystem::WebMercator),
            32601..=32660 => Ok(CoordinateSystem::UTM((epsg - 32600) as u8, true)),
            32701..=32760 => Ok(CoordinateSystem::UTM((epsg - 32700) as u8, false)),
            _ => Ok(CoordinateSystem::Other(epsg)),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsg_round_trip() {
        assert_eq!(CoordinateSystemFactory::from_epsg(4326).unwrap(), CoordinateSystem::WGS84);
        assert_eq!(CoordinateSystemFactory::from_epsg(32617).unwrap().epsg_code(), 32617);
        assert_eq!(CoordinateSystemFactory::from_epsg(2154).unwrap(), CoordinateSystem::Other(2154));
    }

    #[test]
    fn test_wkt_availability() {
        assert!(CoordinateSystem::WGS84.wkt().is_some());
        assert!(CoordinateSystem::UTM(17, true).wkt().unwrap().contains("UTM_Zone_17N"));
        assert!(CoordinateSystem::Other(2154).wkt().is_none());
    }
}
