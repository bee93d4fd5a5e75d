use gpkg_wkb::{Endianness, Geometry, WkbGeometry, WriteOptions};

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if let Err(err) = run() {
        eprintln!("wkt_to_wkb failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut wkt = None;
    let mut endianness = Endianness::LittleEndian;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--big-endian" => endianness = Endianness::BigEndian,
            _ => wkt = Some(arg),
        }
    }
    let wkt = wkt.ok_or("Usage: wkt_to_wkb <wkt> [--big-endian]")?;

    let geometry = Geometry::from_wkt(&wkt)?;
    let options = WriteOptions {
        endianness,
        ..Default::default()
    };
    let bytes = geometry.to_wkb(&options)?;
    log::debug!("{} encoded to {} bytes", geometry.type_name(), bytes.len());

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    println!("{hex}");

    let envelope = geometry.create_envelope();
    if envelope.is_empty() {
        println!("envelope: none");
    } else {
        println!("envelope: {:?}", envelope.to_array());
    }
    Ok(())
}
