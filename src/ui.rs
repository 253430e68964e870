use crate::record::VersionRecord;

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

pub fn display_record(record: &VersionRecord) {
    println!("\n\x1b[1mResolved version\x1b[0m");
    println!("  Bundle version: {}", record.bundle_version_with_hash());
    println!("  iOS build number:            {}", record.ios_build_number);
    println!(
        "  Android bundle version code: {}",
        record.android_bundle_version_code
    );
}
