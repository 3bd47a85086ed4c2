// Static tables for the air-quality dataset

/// Required CSV columns; the loader rejects a file missing any of these.
pub const STATION_COLUMN: &str = "station";
pub const TIME_COLUMN: &str = "time";
pub const WIND_COLUMN: &str = "wd";
pub const PM25_COLUMN: &str = "PM2.5";

pub const REQUIRED_COLUMNS: [&str; 4] =
    [STATION_COLUMN, TIME_COLUMN, WIND_COLUMN, PM25_COLUMN];

/// Columns never shown as metrics in the detail panel. The date-part columns
/// (`year`, `month`, `day`, `hour`, `date_str`) exist in the joined CSV purely
/// for filtering and would produce meaningless hour-over-hour deltas.
pub const EXCLUDED_DETAIL_COLUMNS: [&str; 7] =
    ["station", "time", "date_str", "year", "hour", "month", "day"];

/// Timestamp format of the `time` column, with an ISO `T`-separated fallback.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIME_FORMAT_ISO: &str = "%Y-%m-%dT%H:%M:%S";

/// Base map viewport: central Beijing, wide enough for every station marker.
pub const MAP_CENTER: (f64, f64) = (39.9042, 116.4074);
pub const MAP_ZOOM: u8 = 10;

/// Monitoring stations with their fixed coordinates. Hardcoded, not derived
/// from the dataset.
pub const STATION_COORDS: [(&str, f64, f64); 12] = [
    ("Aotizhongxin", 41.749431, 123.534706),
    ("Changping", 23.169276, 113.472297),
    ("Dingling", 40.28901087962015, 116.22820454435723),
    ("Dongsi", 39.919777385684995, 116.4175980582735),
    ("Guanyuan", 39.93566504856561, 116.36091220694566),
    ("Gucheng", 39.90750287654859, 116.20523143821556),
    ("Huairou", 40.28010674366511, 116.70020509174464),
    ("Nongzhanguan", 39.93366451803525, 116.46750481009873),
    ("Shunyi", 40.13038897356548, 116.65058656480477),
    ("Tiantan", 39.11564446598443, 117.15803926397433),
    ("Wanliu", 39.99762499454515, 116.25763437810566),
    ("Wanshouxigong", 39.90605105134053, 116.26267364841948),
];

/// The 16 compass points reported in the `wd` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindDirection {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl WindDirection {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(WindDirection::N),
            "NNE" => Some(WindDirection::Nne),
            "NE" => Some(WindDirection::Ne),
            "ENE" => Some(WindDirection::Ene),
            "E" => Some(WindDirection::E),
            "ESE" => Some(WindDirection::Ese),
            "SE" => Some(WindDirection::Se),
            "SSE" => Some(WindDirection::Sse),
            "S" => Some(WindDirection::S),
            "SSW" => Some(WindDirection::Ssw),
            "SW" => Some(WindDirection::Sw),
            "WSW" => Some(WindDirection::Wsw),
            "W" => Some(WindDirection::W),
            "WNW" => Some(WindDirection::Wnw),
            "NW" => Some(WindDirection::Nw),
            "NNW" => Some(WindDirection::Nnw),
            _ => None,
        }
    }

    /// Heading in degrees. `N` is 360, closing the compass after NNW's 337.5.
    pub fn degrees(self) -> f64 {
        match self {
            WindDirection::N => 360.0,
            WindDirection::Nne => 22.5,
            WindDirection::Ne => 45.0,
            WindDirection::Ene => 67.5,
            WindDirection::E => 90.0,
            WindDirection::Ese => 112.5,
            WindDirection::Se => 135.0,
            WindDirection::Sse => 157.5,
            WindDirection::S => 180.0,
            WindDirection::Ssw => 202.5,
            WindDirection::Sw => 225.0,
            WindDirection::Wsw => 247.5,
            WindDirection::W => 270.0,
            WindDirection::Wnw => 292.5,
            WindDirection::Nw => 315.0,
            WindDirection::Nnw => 337.5,
        }
    }
}
