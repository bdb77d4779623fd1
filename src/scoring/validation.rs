use super::table::{EventType, ScoringTable};
use crate::events::events_for;

/// Validate a scoring table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_table(table: &ScoringTable) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (event_type, event, formula) in table.iter() {
        let path = format!("scoring_table.{}.{}", event_type, event);

        if !formula.a.is_finite() || formula.a <= 0.0 {
            errors.push(format!("{}.A: must be a positive number, got {}", path, formula.a));
        }
        if !formula.b.is_finite() || formula.b < 0.0 {
            errors.push(format!("{}.B: must be a non-negative number, got {}", path, formula.b));
        }
        if !formula.c.is_finite() || formula.c <= 0.0 {
            errors.push(format!("{}.C: must be a positive number, got {}", path, formula.c));
        }
        if formula.unit.kind() != event.kind() {
            errors.push(format!(
                "{}.unit: {} event cannot use a {:?} formula",
                path,
                event.kind(),
                formula.unit
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Program events the table has no formula for. These always score 0,
/// which a partial custom table makes easy to miss.
pub fn missing_formulas(table: &ScoringTable) -> Vec<String> {
    EventType::ALL
        .into_iter()
        .flat_map(|event_type| {
            events_for(event_type)
                .iter()
                .filter(move |spec| table.lookup(event_type, spec.event).is_none())
                .map(move |spec| format!("scoring_table.{}.{}", event_type, spec.name()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Event, EventType, FormulaUnit, ScoringFormula};
    use std::collections::BTreeMap;

    fn single(event: Event, formula: ScoringFormula) -> ScoringTable {
        let mut events = BTreeMap::new();
        events.insert(event, formula);
        let mut tables = BTreeMap::new();
        tables.insert(EventType::Decathlon, events);
        ScoringTable::new(tables)
    }

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(validate_table(&ScoringTable::world_athletics()).is_ok());
    }

    #[test]
    fn test_empty_table_is_valid() {
        assert!(validate_table(&ScoringTable::new(BTreeMap::new())).is_ok());
    }

    #[test]
    fn test_builtin_table_covers_every_program() {
        assert!(missing_formulas(&ScoringTable::world_athletics()).is_empty());
    }

    #[test]
    fn test_missing_formulas_listed() {
        let table = single(
            Event::Sprint100,
            ScoringFormula::new(25.4347, 18.0, 1.81, FormulaUnit::Seconds),
        );
        let missing = missing_formulas(&table);
        // 9 other decathlon events, all of heptathlon and pentathlon
        assert_eq!(missing.len(), 9 + 7 + 5);
        assert!(missing.contains(&"scoring_table.decathlon.Long Jump".to_string()));
        assert!(missing.contains(&"scoring_table.pentathlon.800m".to_string()));
        assert!(!missing.contains(&"scoring_table.decathlon.100m".to_string()));
    }

    #[test]
    fn test_negative_coefficient() {
        let table = single(
            Event::Sprint100,
            ScoringFormula::new(-1.0, 18.0, 1.81, FormulaUnit::Seconds),
        );
        let errors = validate_table(&table).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring_table.decathlon.100m.A"));
    }

    #[test]
    fn test_zero_exponent() {
        let table = single(
            Event::Discus,
            ScoringFormula::new(12.91, 4.0, 0.0, FormulaUnit::Meters),
        );
        let errors = validate_table(&table).unwrap_err();
        assert!(errors[0].contains("Discus.C"));
    }

    #[test]
    fn test_unit_mismatch() {
        let table = single(
            Event::Sprint100,
            ScoringFormula::new(25.4347, 18.0, 1.81, FormulaUnit::Centimeters),
        );
        let errors = validate_table(&table).unwrap_err();
        assert!(errors[0].contains("100m.unit"));
    }

    #[test]
    fn test_collects_all_errors() {
        let table = single(
            Event::Sprint100,
            ScoringFormula::new(0.0, f64::NAN, -1.0, FormulaUnit::Meters),
        );
        let errors = validate_table(&table).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
