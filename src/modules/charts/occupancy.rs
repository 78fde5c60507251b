//! Table and seat occupancy summaries shown next to the donut gauges

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyStat {
    pub total: u32,
    pub occupied: u32,
    pub empty: u32,
}

impl OccupancyStat {
    pub const fn new(total: u32, occupied: u32, empty: u32) -> Self {
        Self {
            total,
            occupied,
            empty,
        }
    }

    pub fn occupied_percent(&self) -> u32 {
        percent(self.occupied, self.total)
    }

    pub fn empty_percent(&self) -> u32 {
        percent(self.empty, self.total)
    }

    /// Fraction occupied in `0.0..=1.0`, for gauges
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.occupied as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }
}

pub const TABLES: OccupancyStat = OccupancyStat::new(35, 12, 23);
pub const SEATS: OccupancyStat = OccupancyStat::new(104, 45, 59);

/// Rounded percentage, half away from zero; 0 when `total` is 0
pub fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

pub fn table_lines(stat: &OccupancyStat) -> [String; 2] {
    [
        format!(
            "Mesas vacías: {}/{} ({}%)",
            stat.empty,
            stat.total,
            stat.empty_percent()
        ),
        format!(
            "Mesas ocupadas: {}/{} ({}%)",
            stat.occupied,
            stat.total,
            stat.occupied_percent()
        ),
    ]
}

pub fn seat_lines(stat: &OccupancyStat) -> [String; 2] {
    [
        format!(
            "Asientos vacíos: {}/{} ({}%)",
            stat.empty,
            stat.total,
            stat.empty_percent()
        ),
        format!(
            "Asientos ocupados: {}/{} ({}%)",
            stat.occupied,
            stat.total,
            stat.occupied_percent()
        ),
    ]
}

/// Extra figures of the table-occupancy panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableTurnover {
    pub terrace_tables: u32,
    pub indoor_tables: u32,
    pub mean_minutes: u32,
    pub rotation: f64,
    pub efficiency: u32,
    pub efficiency_target: u32,
}

pub const TURNOVER: TableTurnover = TableTurnover {
    terrace_tables: 15,
    indoor_tables: 20,
    mean_minutes: 105,
    rotation: 4.5,
    efficiency: 78,
    efficiency_target: 85,
};

impl TableTurnover {
    pub fn zone_lines(&self) -> [String; 2] {
        let total = self.terrace_tables + self.indoor_tables;
        [
            format!(
                "Terraza: {} ({}%)",
                self.terrace_tables,
                percent(self.terrace_tables, total)
            ),
            format!(
                "Interior: {} ({}%)",
                self.indoor_tables,
                percent(self.indoor_tables, total)
            ),
        ]
    }

    pub fn time_line(&self) -> String {
        format!(
            "Tiempo medio: {} min · Rotación: {:.1}",
            self.mean_minutes, self.rotation
        )
    }

    pub fn efficiency_line(&self) -> String {
        format!(
            "Eficiencia: {}% (objetivo {}%)",
            self.efficiency, self.efficiency_target
        )
    }
}
