use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::ExerciseRecord;

/// Canonical lookup key for a header cell: lower-cased, accents stripped
/// (NFD + combining marks dropped), all whitespace removed.
pub fn normalize_header(raw: &str) -> String {
    raw.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !c.is_whitespace())
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Name,
    Target,
    PresetWeight,
    PresetRest,
    Notes,
}

/// Ordered column-detection rules, matched by substring containment on the
/// normalized header. A header may satisfy several rules; all matches are
/// kept so the row values land in every field the header claims.
const COLUMN_RULES: &[(&[&str], Field)] = &[
    (&["ejercicio"], Field::Name),
    (&["series", "reps"], Field::Target),
    (&["peso", "carga"], Field::PresetWeight),
    (&["descanso", "pausa", "rest"], Field::PresetRest),
    (&["nota"], Field::Notes),
];

/// Evaluate the rule table once per header. Duplicate headers are not
/// deduplicated; at assignment time the last matching column wins.
fn detect_columns(headers: &[String]) -> Vec<(usize, Field)> {
    let mut columns = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        for (needles, field) in COLUMN_RULES {
            if needles.iter().any(|n| header.contains(n)) {
                columns.push((idx, *field));
            }
        }
    }
    columns
}

/// Map raw spreadsheet rows (row 0 = headers, day label in column 0) to
/// exercise records. Blank day cells inherit the nearest preceding non-blank
/// day; rows without an exercise name, or whose name is the stray header
/// literal, are dropped.
pub fn map_rows(values: &[Vec<String>]) -> Vec<ExerciseRecord> {
    let Some((header_row, data_rows)) = values.split_first() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
    let columns = detect_columns(&headers);

    let (_, records) = data_rows.iter().fold(
        (String::new(), Vec::new()),
        |(mut last_day, mut records), row| {
            let day_cell = row.first().map(|c| c.trim()).unwrap_or("");
            if !day_cell.is_empty() {
                last_day = day_cell.to_uppercase();
            }

            let mut record = ExerciseRecord {
                day: last_day.clone(),
                ..ExerciseRecord::default()
            };
            for (idx, field) in &columns {
                let value = row.get(*idx).cloned().unwrap_or_default();
                match field {
                    Field::Name => record.name = value,
                    Field::Target => record.target = value,
                    Field::PresetWeight => record.preset_weight = value,
                    Field::PresetRest => record.preset_rest = value,
                    Field::Notes => record.notes = value,
                }
            }

            if !record.name.trim().is_empty() && record.name != "EJERCICIO" {
                records.push(record);
            }
            (last_day, records)
        },
    );
    records
}

fn digit_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

impl ExerciseRecord {
    /// Rest duration in seconds, digits extracted from the preset text.
    /// Anything empty, unparseable or non-positive falls back to 90.
    pub fn rest_seconds(&self) -> u32 {
        let digits: String = self
            .preset_rest
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok().filter(|&n| n > 0).unwrap_or(90)
    }

    /// Target set count: first digit run of the target text ("4x10" -> 4),
    /// defaulting to 3.
    pub fn target_series(&self) -> u32 {
        digit_runs(&self.target)
            .first()
            .and_then(|run| run.parse().ok())
            .unwrap_or(3)
    }

    /// Suggested rep count for prefilling the set modal: the second digit
    /// run of a "sets x reps" target, the only run when there is just one,
    /// empty otherwise.
    pub fn suggested_reps(&self) -> String {
        let runs = digit_runs(&self.target);
        match runs.len() {
            0 => String::new(),
            1 => runs[0].clone(),
            _ => runs[1].clone(),
        }
    }
}

/// A day counts as recovery when its filtered list is empty or any row is
/// tagged as such (placeholder name, or notes mentioning rest).
pub fn is_rest_day(records: &[ExerciseRecord]) -> bool {
    records.is_empty()
        || records.iter().any(|r| {
            r.name.trim() == "—" || normalize_header(&r.notes).contains("descanso")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn normalize_strips_case_accents_and_whitespace() {
        assert_eq!(normalize_header("  Día  "), "dia");
        assert_eq!(normalize_header("PESO KG"), "pesokg");
        assert_eq!(normalize_header("Descanso Prestablecido"), "descansoprestablecido");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["Día", "EJERCICIO", "Series x Reps", "  Notas  ", "ñandú"] {
            let once = normalize_header(raw);
            assert_eq!(normalize_header(&once), once);
        }
    }

    #[test]
    fn maps_rows_and_propagates_days() {
        let values = rows(&[
            &["DIA", "EJERCICIO", "SERIES X REPS", "PESO", "DESCANSO", "NOTAS"],
            &["Lunes", "Sentadilla", "4x10", "80", "90 seg", ""],
            &["", "Prensa", "3x12", "120", "", "controlado"],
            &["Martes ", "Press Banca", "4x8", "60", "120", ""],
        ]);
        let records = map_rows(&values);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].day, "LUNES");
        assert_eq!(records[1].day, "LUNES");
        assert_eq!(records[1].name, "Prensa");
        assert_eq!(records[1].notes, "controlado");
        assert_eq!(records[2].day, "MARTES");
        assert_eq!(records[2].preset_weight, "60");
    }

    #[test]
    fn drops_blank_names_and_stray_header_rows() {
        let values = rows(&[
            &["DIA", "EJERCICIO"],
            &["LUNES", "Sentadilla"],
            &["", "EJERCICIO"],
            &["", "   "],
        ]);
        let records = map_rows(&values);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Sentadilla");
        assert_eq!(records[0].day, "LUNES");
    }

    #[test]
    fn whitespace_only_day_cell_inherits_previous_day() {
        let values = rows(&[
            &["DIA", "EJERCICIO"],
            &["Lunes", "Sentadilla"],
            &["   ", "Prensa"],
        ]);
        let records = map_rows(&values);
        assert_eq!(records[1].day, "LUNES");
    }

    #[test]
    fn rows_with_no_day_ever_seen_keep_an_empty_day() {
        let values = rows(&[&["DIA", "EJERCICIO"], &["", "Sentadilla"]]);
        let records = map_rows(&values);
        assert_eq!(records[0].day, "");
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let values = rows(&[
            &["DIA", "EJERCICIO", "SERIES", "PESO", "DESCANSO"],
            &["Lunes", "Remo"],
        ]);
        let records = map_rows(&values);
        assert_eq!(records[0].target, "");
        assert_eq!(records[0].preset_rest, "");
    }

    #[test]
    fn duplicate_headers_let_the_last_column_win() {
        let values = rows(&[
            &["DIA", "EJERCICIO", "PESO", "PESO REAL"],
            &["Lunes", "Remo", "40", "42.5"],
        ]);
        let records = map_rows(&values);
        assert_eq!(records[0].preset_weight, "42.5");
    }

    #[test]
    fn accented_headers_still_match() {
        let values = rows(&[
            &["Día", "Ejercicio", "Series x Reps"],
            &["Miércoles", "Dominadas", "3x8"],
        ]);
        let records = map_rows(&values);
        assert_eq!(records[0].day, "MIÉRCOLES");
        assert_eq!(records[0].target, "3x8");
    }

    #[test]
    fn empty_payload_yields_empty_result() {
        assert!(map_rows(&[]).is_empty());
        assert!(map_rows(&rows(&[&["DIA", "EJERCICIO"]])).is_empty());
    }

    fn record_with(target: &str, rest: &str) -> ExerciseRecord {
        ExerciseRecord {
            target: target.to_string(),
            preset_rest: rest.to_string(),
            ..ExerciseRecord::default()
        }
    }

    #[test]
    fn rest_seconds_extracts_digits_and_defaults() {
        assert_eq!(record_with("", "90 seg").rest_seconds(), 90);
        assert_eq!(record_with("", "2'30").rest_seconds(), 230);
        assert_eq!(record_with("", "").rest_seconds(), 90);
        assert_eq!(record_with("", "sin pausa").rest_seconds(), 90);
        assert_eq!(record_with("", "0").rest_seconds(), 90);
    }

    #[test]
    fn target_series_takes_the_first_digit_run() {
        assert_eq!(record_with("4x10", "").target_series(), 4);
        assert_eq!(record_with("12", "").target_series(), 12);
        assert_eq!(record_with("AMRAP", "").target_series(), 3);
    }

    #[test]
    fn suggested_reps_reads_the_rep_side_of_the_target() {
        assert_eq!(record_with("4x10", "").suggested_reps(), "10");
        assert_eq!(record_with("12", "").suggested_reps(), "12");
        assert_eq!(record_with("AMRAP", "").suggested_reps(), "");
    }

    #[test]
    fn rest_day_detection() {
        assert!(is_rest_day(&[]));

        let tagged = ExerciseRecord {
            day: "DOMINGO".into(),
            name: "—".into(),
            ..ExerciseRecord::default()
        };
        assert!(is_rest_day(&[tagged]));

        let noted = ExerciseRecord {
            day: "SÁBADO".into(),
            name: "Caminata".into(),
            notes: "Descanso activo".into(),
            ..ExerciseRecord::default()
        };
        assert!(is_rest_day(&[noted]));

        let normal = ExerciseRecord {
            day: "LUNES".into(),
            name: "Sentadilla".into(),
            ..ExerciseRecord::default()
        };
        assert!(!is_rest_day(std::slice::from_ref(&normal)));
    }
}
