//! water.dat layout tests

use gta_data::DiagnosticCode;
use gta_water::{
    SurfaceVertices, WaterFlag, WaterSurface, WaterVertex, count_valid_surfaces, parse_water,
    write_water,
};
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::BufReader;
use tempfile::TempDir;
use test_case::test_case;

fn corner(id: f64) -> WaterVertex {
    WaterVertex {
        position: [id, id * 10.0, 0.5],
        flow_direction: [0.0, 0.0],
        unknown_height: 0.0,
        wave_height: id / 10.0,
    }
}

fn numbered_line(count: usize) -> String {
    let mut fields: Vec<String> = (1..count).map(|i| i.to_string()).collect();
    fields.push("1".to_string());
    fields.join(" ")
}

#[test_case(22, Some(3); "three corners")]
#[test_case(29, Some(4); "four corners")]
#[test_case(23, None; "between layouts")]
#[test_case(21, None; "too short")]
#[test_case(30, None; "too long")]
fn test_field_count_selects_layout(fields: usize, corners: Option<usize>) {
    let parsed = parse_water(numbered_line(fields).as_bytes()).unwrap();

    assert_eq!(parsed.value.first().map(|s| s.vertices.len()), corners);
    assert_eq!(parsed.report.is_clean(), corners.is_some());
    if fields < 22 {
        assert!(parsed.report.contains(DiagnosticCode::InsufficientFields));
    } else if corners.is_none() {
        assert!(parsed.report.contains(DiagnosticCode::UnexpectedFieldCount));
    }
}

#[test]
fn test_quad_written_as_0_1_3_2() {
    let surface = WaterSurface::quad([corner(0.0), corner(1.0), corner(2.0), corner(3.0)], WaterFlag::DefaultVisible);
    let mut out = Vec::new();
    write_water(&mut out, &[surface]).unwrap();

    let parsed = parse_water(out.as_slice()).unwrap();
    let SurfaceVertices::Quad(written) = parsed.value[0].vertices else {
        panic!("expected a quad");
    };
    let order: Vec<f64> = written.iter().map(|v| v.position[0]).collect();
    assert_eq!(order, vec![0.0, 1.0, 3.0, 2.0]);
}

#[test]
fn test_triangle_written_as_0_2_1() {
    let surface = WaterSurface::triangle([corner(0.0), corner(1.0), corner(2.0)], WaterFlag::DefaultInvisible);
    let mut out = Vec::new();
    write_water(&mut out, &[surface]).unwrap();

    let parsed = parse_water(out.as_slice()).unwrap();
    let SurfaceVertices::Triangle(written) = parsed.value[0].vertices else {
        panic!("expected a triangle");
    };
    let order: Vec<f64> = written.iter().map(|v| v.position[0]).collect();
    assert_eq!(order, vec![0.0, 2.0, 1.0]);
    // Attributes travel with their corner
    assert_eq!(written[1].wave_height, 0.2);
    assert_eq!(written[1].position[1], 20.0);
}

#[test]
fn test_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("water.dat");

    let surfaces = vec![
        WaterSurface::triangle([corner(1.0), corner(2.0), corner(3.0)], WaterFlag::ShallowVisible),
        WaterSurface::quad([corner(4.0), corner(5.0), corner(6.0), corner(7.0)], WaterFlag::DefaultVisible),
    ];
    {
        let mut file = File::create(&path).unwrap();
        assert_eq!(write_water(&mut file, &surfaces).unwrap(), 2);
    }

    let mut text = fs::read_to_string(&path).unwrap();
    text.push_str("# appended by hand\n1 2 3 4\n");
    fs::write(&path, text).unwrap();

    assert_eq!(count_valid_surfaces(BufReader::new(File::open(&path).unwrap())).unwrap(), 2);

    let parsed = parse_water(BufReader::new(File::open(&path).unwrap())).unwrap();
    let flags: Vec<_> = parsed.value.iter().map(|s| s.flag).collect();
    assert_eq!(flags, vec![WaterFlag::ShallowVisible, WaterFlag::DefaultVisible]);
    assert_eq!(parsed.report.len(), 1);
    assert_eq!(parsed.report.diagnostics()[0].line, Some(5));
}
