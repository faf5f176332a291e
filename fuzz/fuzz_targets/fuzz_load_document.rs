#![no_main]
use cbom_explorer::parsers::{DocumentFormat, parse_document_str, parse_dynamic_collection};
use libfuzzer_sys::fuzz_target;

/// Fuzz format sniffing and both document parsers.
///
/// Arbitrary UTF-8 is sniffed for a format and then parsed as a typed
/// document and as a schemaless collection, in JSON and YAML.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = DocumentFormat::sniff(s);
        for format in [DocumentFormat::Json, DocumentFormat::Yaml] {
            if let Ok(mut doc) = parse_document_str(s, format) {
                doc.normalize(chrono::NaiveDate::MIN);
            }
            let _ = parse_dynamic_collection(s, format, "assets");
        }
    }
});
