//! Grid inspection commands (info, cell, cells)

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::region::Region;
use crate::spritesheet::{BoundsPolicy, Spritesheet};

use super::{open_sheet, EXIT_ERROR, EXIT_SUCCESS};

/// Grid geometry as reported by `sgrid info`
#[derive(Debug, Serialize)]
struct GridInfo<'a> {
    texture: &'a str,
    texture_width: u32,
    texture_height: u32,
    cell_width: u32,
    cell_height: u32,
    width: f32,
    height: f32,
    columns: usize,
    rows: usize,
    cell_count: usize,
}

impl<'a> GridInfo<'a> {
    fn new(sheet: &'a Spritesheet) -> Self {
        Self {
            texture: sheet.texture().name(),
            texture_width: sheet.texture().width(),
            texture_height: sheet.texture().height(),
            cell_width: sheet.cell_width(),
            cell_height: sheet.cell_height(),
            width: sheet.width(),
            height: sheet.height(),
            columns: sheet.columns(),
            rows: sheet.rows(),
            cell_count: sheet.cell_count(),
        }
    }
}

/// One cell as reported by `sgrid cell` and `sgrid cells`
#[derive(Debug, Serialize)]
struct CellInfo {
    index: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    uvs: [f32; 4],
    in_bounds: bool,
}

impl CellInfo {
    fn new(index: usize, region: &Region) -> Self {
        Self {
            index,
            x: region.x(),
            y: region.y(),
            width: region.width(),
            height: region.height(),
            uvs: region.uvs(),
            in_bounds: region.contains_texture(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Failed to serialize output: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn print_cell_line(info: &CellInfo) {
    let note = if info.in_bounds { "" } else { " (outside texture)" };
    println!(
        "{:>4}  [{},{}]-[{},{}]{}",
        info.index,
        info.x,
        info.y,
        info.x.saturating_add(info.width),
        info.y.saturating_add(info.height),
        note
    );
}

/// Execute the info command
pub fn run_info(texture: &Path, cell: (u32, u32), json: bool) -> ExitCode {
    let sheet = match open_sheet(texture, cell, BoundsPolicy::Strict) {
        Ok(sheet) => sheet,
        Err(code) => return code,
    };
    let info = GridInfo::new(&sheet);

    if json {
        return print_json(&info);
    }

    println!("Texture:    {} ({}x{})", info.texture, info.texture_width, info.texture_height);
    println!("Cell size:  {}x{}", info.cell_width, info.cell_height);
    println!("Grid:       {} x {}", info.width, info.height);
    println!("Columns:    {}", info.columns);
    println!("Rows:       {}", info.rows);
    println!("Cells:      {}", info.cell_count);
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the cell command
pub fn run_cell(
    texture: &Path,
    index: usize,
    cell: (u32, u32),
    extrapolate: bool,
    json: bool,
) -> ExitCode {
    let policy = if extrapolate { BoundsPolicy::Extrapolate } else { BoundsPolicy::Strict };
    let sheet = match open_sheet(texture, cell, policy) {
        Ok(sheet) => sheet,
        Err(code) => return code,
    };

    let region = match sheet.cell(index) {
        Ok(region) => region,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let info = CellInfo::new(index, &region);
    if json {
        return print_json(&info);
    }

    print_cell_line(&info);
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the cells command
pub fn run_cells(texture: &Path, cell: (u32, u32), json: bool) -> ExitCode {
    let sheet = match open_sheet(texture, cell, BoundsPolicy::Strict) {
        Ok(sheet) => sheet,
        Err(code) => return code,
    };

    let infos: Vec<CellInfo> = sheet
        .cells()
        .iter()
        .enumerate()
        .map(|(index, region)| CellInfo::new(index, region))
        .collect();

    if json {
        return print_json(&infos);
    }

    for info in &infos {
        print_cell_line(info);
    }
    ExitCode::from(EXIT_SUCCESS)
}
