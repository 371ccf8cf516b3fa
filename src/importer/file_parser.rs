// ==========================================
// 手术室需求与产能规划 - 文件解析器
// ==========================================
// 阶段 0: 文件 -> RawTable
// CSV 走 csv crate, Excel (.xlsx/.xls) 走 calamine 首个工作表
// 两者共用表头清洗与行组装 (TableBuilder)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::procedure_importer_trait::{FileParser, RawTable};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 校验文件存在且扩展名属于解析器
fn check_source(path: &Path, parser: &dyn FileParser) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let ext = extension_of(path);
    if !parser.extensions().contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// ==========================================
// TableBuilder - 表头清洗 + 行组装
// ==========================================
struct TableBuilder {
    table: RawTable,
}

impl TableBuilder {
    fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers = headers
            .into_iter()
            .map(|h| h.as_ref().trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self {
            table: RawTable {
                headers,
                rows: Vec::new(),
            },
        }
    }

    /// 按列序对齐表头; 多出的单元格丢弃, 全空行跳过
    fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row: HashMap<String, String> = self
            .table
            .headers
            .iter()
            .zip(cells)
            .map(|(header, cell)| (header.clone(), cell.as_ref().trim().to_string()))
            .collect();
        if row.values().any(|v| !v.is_empty()) {
            self.table.rows.push(row);
        }
    }

    fn finish(self) -> RawTable {
        self.table
    }
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        check_source(file_path, self)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(File::open(file_path)?);

        let mut builder = TableBuilder::with_headers(reader.headers()?.iter());
        for record in reader.records() {
            builder.push_row(record?.iter());
        }
        Ok(builder.finish())
    }
}

// ==========================================
// ExcelParser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["xlsx", "xls"]
    }

    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        check_source(file_path, self)?;

        let mut workbook = open_workbook_auto(file_path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("工作表缺少表头行".to_string()))?;

        let mut builder = TableBuilder::with_headers(header_row);
        for cells in rows {
            builder.push_row(cells);
        }
        Ok(builder.finish())
    }
}

// ==========================================
// UniversalFileParser - 按扩展名分派
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let parsers: [&dyn FileParser; 2] = [&CsvParser, &ExcelParser];
        let ext = extension_of(path);
        parsers
            .iter()
            .find(|p| p.extensions().contains(&ext.as_str()))
            .ok_or(ImportError::UnsupportedFormat(ext.clone()))?
            .parse_table(path)
    }
}
