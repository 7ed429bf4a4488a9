use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const TABLE_SIZE: usize = 64;

fn compute_theta_table() -> [f64; TABLE_SIZE] {
    (0..TABLE_SIZE)
        .map(|i| f64::atan2(1.0, f64::powf(2.0, i as _)))
        .collect::<Vec<f64>>()
        .try_into()
        .unwrap()
}

fn compute_scale_table() -> [f64; TABLE_SIZE] {
    let mut k = 1.0;
    (0..TABLE_SIZE)
        .map(|i| { k /= f64::sqrt(1.0 + f64::powf(2.0, -2.0 * i as f64)); k })
        .collect::<Vec<f64>>()
        .try_into()
        .unwrap()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("cordic_tables.rs");
    let mut f = File::create(dest_path).unwrap();

    let theta_table = compute_theta_table();
    writeln!(&mut f, "#[allow(clippy::approx_constant)]").unwrap();
    writeln!(&mut f, "pub(crate) const THETA_TABLE: [f64; {}] = {:?};", theta_table.len(), theta_table).unwrap();
    let scale_table = compute_scale_table();
    writeln!(&mut f, "#[allow(clippy::approx_constant)]").unwrap();
    writeln!(&mut f, "pub(crate) const SCALE_TABLE: [f64; {}] = {:?};", scale_table.len(), scale_table).unwrap();
}
