// Primitives for reading the CSV tables.

use std::fs::File;

use crate::story::io_common::{parse_percentage, simplify_file_name};
use crate::story::*;

/// The candidate names, from the header row of the names table.
pub fn read_names(path: &str) -> BStoryResult<Vec<String>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu { path, lineno: 1_usize })?,
        None => {
            warn!("read_names: {} is empty", simplify_file_name(path));
            return Ok(vec![]);
        }
    };
    let names: Vec<String> = header
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    info!(
        "read_names: {} candidates in {}",
        names.len(),
        simplify_file_name(path)
    );
    Ok(names)
}

/// The voter choice and the favorability of every row of the ranks table.
pub fn read_ranks(path: &str) -> BStoryResult<(Vec<RankedEntry>, Vec<FavorabilityEntry>)> {
    let (records, columns) = get_records(
        path,
        &["Name", "Primary", "Favorability", "Unfavorability"],
    )?;
    let mut ranks: Vec<RankedEntry> = Vec::new();
    let mut favorability: Vec<FavorabilityEntry> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_ranks: lineno: {:?} row: {:?}", lineno, line);
        let name = get_cell(&line, columns[0], path, lineno)?.trim().to_string();
        let primary = get_percentage(&line, columns[1], path, lineno)?;
        let favorable = get_percentage(&line, columns[2], path, lineno)?;
        let unfavorable = get_percentage(&line, columns[3], path, lineno)?;
        ranks.push(RankedEntry {
            name: name.clone(),
            percentage: primary,
        });
        favorability.push(FavorabilityEntry {
            name,
            favorable: favorable as i32,
            unfavorable: unfavorable as i32,
        });
    }
    Ok((ranks, favorability))
}

/// The rows of the historical presidential results. All the years and parties are kept.
pub fn read_results(path: &str) -> BStoryResult<Vec<ElectionResultRow>> {
    let (records, columns) = get_records(
        path,
        &[
            "year",
            "state",
            "state_po",
            "party",
            "candidatevotes",
            "totalvotes",
        ],
    )?;
    let mut res: Vec<ElectionResultRow> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        res.push(ElectionResultRow {
            year: get_number(&line, columns[0], path, lineno)? as u32,
            state: get_cell(&line, columns[1], path, lineno)?.to_string(),
            state_po: get_cell(&line, columns[2], path, lineno)?.to_string(),
            party: get_cell(&line, columns[3], path, lineno)?.to_string(),
            candidate_votes: get_number(&line, columns[4], path, lineno)?,
            total_votes: get_number(&line, columns[5], path, lineno)?,
        });
    }
    info!(
        "read_results: {} rows in {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

// Opens a table with a header row and finds the index of each of the requested columns.
fn get_records(
    path: &str,
    names: &[&str],
) -> BStoryResult<(csv::StringRecordsIntoIter<File>, Vec<usize>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let headers = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1_usize })?
        .clone();
    let mut columns: Vec<usize> = Vec::new();
    for name in names.iter() {
        let idx = headers
            .iter()
            .position(|h| h.trim() == *name)
            .context(CsvMissingColumnSnafu {
                path,
                column: *name,
            })?;
        columns.push(idx);
    }
    debug!("get_records: {}: columns {:?}", path, columns);
    Ok((rdr.into_records(), columns))
}

fn get_cell<'a>(
    line: &'a csv::StringRecord,
    idx: usize,
    path: &str,
    lineno: usize,
) -> BStoryResult<&'a str> {
    let cell = line.get(idx).context(CsvLineTooShortSnafu { path, lineno })?;
    Ok(cell)
}

fn get_percentage(
    line: &csv::StringRecord,
    idx: usize,
    path: &str,
    lineno: usize,
) -> BStoryResult<u32> {
    let cell = get_cell(line, idx, path, lineno)?;
    let p = parse_percentage(cell).context(ParsingPercentageSnafu {
        path,
        lineno,
        value: cell,
    })?;
    Ok(p)
}

fn get_number(
    line: &csv::StringRecord,
    idx: usize,
    path: &str,
    lineno: usize,
) -> BStoryResult<u64> {
    let cell = get_cell(line, idx, path, lineno)?;
    let x = cell.trim().parse::<u64>().ok().context(ParsingNumberSnafu {
        path,
        lineno,
        value: cell,
    })?;
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let p = dir.path().join(name);
        let mut f = File::create(&p).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        p.display().to_string()
    }

    #[test]
    fn names_from_header() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(&dir, "names.csv", "Joe_Biden,Bernie_Sanders, Pete_Buttigieg\n");
        assert_eq!(
            read_names(&p).unwrap(),
            vec!["Joe_Biden", "Bernie_Sanders", "Pete_Buttigieg"]
        );
        let p = write_file(&dir, "empty.csv", "");
        assert!(read_names(&p).unwrap().is_empty());
    }

    #[test]
    fn ranks_with_percent_signs() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(
            &dir,
            "ranks.csv",
            "Name,Primary,Favorability,Unfavorability\nJoe_Biden,31%,60%,28%\nTom_Steyer,1,20,17\n",
        );
        let (ranks, fav) = read_ranks(&p).unwrap();
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks[0].percentage, 31);
        assert_eq!(ranks[1].name, "Tom_Steyer");
        assert_eq!(fav[0].favorable, 60);
        assert_eq!(fav[0].unfavorable, 28);
    }

    #[test]
    fn malformed_ranks() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(
            &dir,
            "ranks.csv",
            "Name,Primary,Favorability,Unfavorability\nJoe_Biden,lots,60%,28%\n",
        );
        match read_ranks(&p).map_err(|e| *e) {
            Err(StoryError::ParsingPercentage { lineno, value, .. }) => {
                assert_eq!(lineno, 2);
                assert_eq!(value, "lots");
            }
            x => panic!("unexpected result {:?}", x),
        }
        let p = write_file(&dir, "no_name.csv", "Primary,Favorability,Unfavorability\n1,2,3\n");
        assert!(matches!(
            read_ranks(&p).map_err(|e| *e),
            Err(StoryError::CsvMissingColumn { .. })
        ));
        assert!(matches!(
            read_ranks(&dir.path().join("missing.csv").display().to_string()).map_err(|e| *e),
            Err(StoryError::CsvOpen { .. })
        ));
    }

    #[test]
    fn results_table() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(
            &dir,
            "results.csv",
            "year,state,state_po,state_fips,office,candidate,party,writein,candidatevotes,totalvotes\n\
             2016,Alabama,AL,1,US President,\"Trump, Donald J.\",republican,FALSE,1318255,2123372\n\
             2016,Alabama,AL,1,US President,Other,,TRUE,21712,2123372\n",
        );
        let rows = read_results(&p).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].state_po, "AL");
        assert_eq!(rows[0].candidate_votes, 1318255);
        assert_eq!(rows[1].party, "");
        assert_eq!(rows[1].total_votes, 2123372);
    }
}
