use super::text::RecordReader;
use crate::domain::{Demand, DemandDescriptor};
use crate::error::LoadError;

/// Parse the demand file: `location required price` per record
pub fn parse_demands(file: &str, contents: &str) -> Result<Vec<Demand>, LoadError> {
    let mut reader = RecordReader::new(file, contents);
    let mut demands = Vec::new();

    while reader.next_record().is_some() {
        let descriptor = DemandDescriptor {
            location: reader.field("location")?,
            required_mw: reader.field("required")?,
            retail_price_per_mw: reader.field("price")?,
        };
        demands.push(Demand::try_from(descriptor)?);
    }

    Ok(demands)
}
