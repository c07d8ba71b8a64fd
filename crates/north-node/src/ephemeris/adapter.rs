use crate::ephemeris::types::{GeoLocation, HousePositions, HouseSystem, NodeKind, NodePosition};
use crate::time::UtInstant;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path};
use swisseph::{AscMc, Cusp};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate {body} position at JD {jd}: {message}")]
    CalculationFailed {
        body: String,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of node positions and house cusps.
///
/// Implementations are called from a blocking worker, one call per request.
pub trait EphemerisProvider: Send + Sync {
    fn lunar_node(&self, jd_ut: f64, kind: NodeKind) -> Result<NodePosition, EphemerisError>;

    fn houses(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError>;
}

// FLG_SWIEPH = 2, FLG_SPEED = 256
const CALC_FLAGS: i32 = 2 | 256;
// Tropical, non-radian cusps
const HOUSE_FLAGS: i32 = 0;
const GREG_CAL: u32 = 1;

lazy_static::lazy_static! {
    // Swiss Ephemeris keeps global C state; every call into it is serialized.
    static ref SWE_GUARD: Mutex<()> = Mutex::new(());
}

fn swe_lock() -> MutexGuard<'static, ()> {
    SWE_GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// `SWISS_EPHEMERIS_PATH` takes precedence over the configured path. Without
    /// either, Swiss Ephemeris falls back to its built-in analytical model.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = env::var("SWISS_EPHEMERIS_PATH")
            .map(PathBuf::from)
            .ok()
            .or(ephemeris_path);

        if let Some(path) = &path {
            if !path.exists() {
                return Err(EphemerisError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
            let arg = ephe_path_arg(path)?;
            let _lock = swe_lock();
            set_ephe_path(arg);
            log::info!("Using Swiss Ephemeris data files from {}", arg);
        } else {
            log::info!("No ephemeris path configured; using built-in Moshier model");
        }

        Ok(Self { ephemeris_path: path })
    }

    /// The data path handed to Swiss Ephemeris, if any
    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }
}

/// The C library takes a NUL-terminated UTF-8 string
fn ephe_path_arg(path: &Path) -> Result<&str, EphemerisError> {
    let not_usable = |message: &str| EphemerisError::FileNotFound {
        path: path.display().to_string(),
        message: message.to_string(),
    };
    let text = path.to_str().ok_or_else(|| not_usable("Ephemeris path is not valid UTF-8."))?;
    if text.contains('\0') {
        return Err(not_usable("Ephemeris path contains a NUL byte."));
    }
    Ok(text)
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn lunar_node(&self, jd_ut: f64, kind: NodeKind) -> Result<NodePosition, EphemerisError> {
        let _lock = swe_lock();
        let body = format!("{:?} node", kind).to_lowercase();

        let result = calc_ut(jd_ut, kind.body_id() as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.clone(),
                jd: jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        if !out[0].is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "no usable longitude returned".to_string(),
            });
        }

        Ok(NodePosition {
            lon: out[0].rem_euclid(360.0),
            lat: out[1],
            speed_lon: out[3],
            retrograde: out[3] < 0.0,
        })
    }

    fn houses(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError> {
        let _lock = swe_lock();

        let (c, a) = houses_ex(jd_ut, HOUSE_FLAGS, location.lat, location.lon, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let raw = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if raw.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} cusps unavailable at lat {}", system, location.lat),
            });
        }
        // All-zero cusps are what the C library leaves behind when it gives up
        if raw.iter().all(|c| *c == 0.0) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} returned no cusp data", system),
            });
        }

        Ok(HousePositions {
            system,
            cusps: raw.map(|c| c.rem_euclid(360.0)),
            ascendant: ascmc.ascendant.rem_euclid(360.0),
            midheaven: ascmc.mc.rem_euclid(360.0),
        })
    }
}

/// Convert a UT instant to a Julian Day number
pub fn julian_day(ut: &UtInstant) -> f64 {
    julday(ut.year(), ut.month() as i32, ut.day() as i32, ut.hour(), GREG_CAL)
}
