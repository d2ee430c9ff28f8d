use std::str::FromStr;

use super::text::RecordReader;
use crate::domain::{Plant, PlantCategory, PlantDescriptor, PlantKind};
use crate::error::LoadError;

/// Parse the plant descriptor file.
///
/// Each record is `name type sustain cost capacity uptime` followed by the
/// parameters specific to the plant type.
pub fn parse_plants(file: &str, contents: &str) -> Result<Vec<Plant>, LoadError> {
    let mut reader = RecordReader::new(file, contents);
    let mut plants = Vec::new();

    while reader.next_record().is_some() {
        let name: String = reader.field("name")?;
        let tag: String = reader.field("type")?;
        let sustain_score = reader.field("sustain")?;
        let cost_per_mw = reader.field("cost")?;
        let max_capacity_mw = reader.field("capacity")?;
        let uptime_percent = reader.field("uptime")?;

        let category =
            PlantCategory::from_str(&tag).map_err(|_| LoadError::UnknownCategory(tag.clone()))?;
        let kind = read_kind(&mut reader, category)?;

        let plant = Plant::try_from(PlantDescriptor {
            name,
            sustain_score,
            cost_per_mw,
            max_capacity_mw,
            uptime_percent,
            kind,
        })?;
        plants.push(plant);
    }

    Ok(plants)
}

fn read_kind(reader: &mut RecordReader<'_>, category: PlantCategory) -> Result<PlantKind, LoadError> {
    let kind = match category {
        PlantCategory::Solar => PlantKind::Solar {
            panel_count: reader.field("panel_count")?,
            sunlight_hours: reader.field("sunlight_hours")?,
        },
        PlantCategory::Wind => PlantKind::Wind {
            turbine_count: reader.field("turbine_count")?,
            avg_wind_speed: reader.field("wind_speed")?,
        },
        PlantCategory::Fossil => PlantKind::Fossil {
            fuel_type: reader.field("fuel_type")?,
            emission_rate: reader.field("emission_rate")?,
        },
        PlantCategory::Hydro => PlantKind::Hydro {
            water_flow_rate: reader.field("water_flow_rate")?,
        },
        PlantCategory::Nuclear => PlantKind::Nuclear,
        PlantCategory::Geothermal => PlantKind::Geothermal,
        PlantCategory::Fusion => PlantKind::Fusion {
            neutron_flux: reader.field("neutron_flux")?,
        },
        PlantCategory::Dilithium => PlantKind::Dilithium {
            crystal_purity: reader.field("crystal_purity")?,
            field_stability: reader.field("field_stability")?,
        },
    };
    Ok(kind)
}
