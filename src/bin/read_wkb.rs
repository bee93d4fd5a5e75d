use gpkg_wkb::{Geometry, GpkgBinaryHeader, WkbGeometry};

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if let Err(err) = run() {
        eprintln!("read_wkb failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: read_wkb <path-to-wkb-or-gpkg-blob>")?;
    let raw = std::fs::read(&path)?;
    // Accept the hex text printed by wkt_to_wkb as well as raw bytes.
    let bytes = match std::str::from_utf8(&raw) {
        Ok(text) if is_hex(text.trim()) => decode_hex(text.trim())?,
        _ => raw,
    };

    let geometry = if bytes.starts_with(b"GP") {
        let header = GpkgBinaryHeader::read(&bytes)?;
        println!(
            "gpkg header: version {}, srs_id {}, flags {:#010b}, {} bytes",
            header.version,
            header.srs_id,
            header.flags(),
            header.byte_size()
        );
        Geometry::from_wkb(&bytes[header.byte_size()..])?
    } else {
        Geometry::from_wkb(&bytes)?
    };

    print_geometry(&geometry, 0);
    Ok(())
}

fn print_geometry(geometry: &Geometry, depth: usize) {
    let envelope = geometry.create_envelope();
    let envelope = if envelope.is_empty() {
        "none".to_string()
    } else {
        format!("{:?}", envelope.to_array())
    };
    println!(
        "{:indent$}{} (type code {}, {:?}){} envelope: {envelope}",
        "",
        geometry.type_name(),
        geometry.type_code(),
        geometry.dimension(),
        if geometry.is_empty() { " empty," } else { "" },
        indent = depth * 2
    );

    let members: Vec<Geometry> = match geometry {
        Geometry::MultiPoint(multi) => multi.points().iter().cloned().map(Geometry::from).collect(),
        Geometry::MultiLineString(multi) => multi
            .line_strings()
            .iter()
            .cloned()
            .map(Geometry::from)
            .collect(),
        Geometry::MultiPolygon(multi) => {
            multi.polygons().iter().cloned().map(Geometry::from).collect()
        }
        Geometry::GeometryCollection(collection) => collection.geometries().to_vec(),
        _ => Vec::new(),
    };
    for member in &members {
        print_geometry(member, depth + 1);
    }
}

fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn decode_hex(text: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16))
        .collect()
}
