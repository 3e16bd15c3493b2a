use crate::report::RosterRow;

pub fn render_roster_json(rows: &[RosterRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
