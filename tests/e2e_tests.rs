//! End-to-end integration tests
//!
//! These tests validate the complete purchase processing pipeline using
//! predefined CSV test fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Drives all purchase requests through the issuance workflow
//! 3. Generates the issued-pass output CSV
//! 4. Compares actual output with expected.csv
//!
//! Pass secrets are freshly generated on every run, so the comparison
//! first asserts that each secret is a well-formed, unique UUID and then
//! blanks the secret column before diffing against the expected file
//! (whose secret column is empty).
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path across every instrument family
//! - Repeat purchases by one owner (distinct secrets, stable order)
//! - Instrument validation rejections (UPI whitelist, card lengths,
//!   unlisted wallets/banks/tenors)
//! - Unknown stations and offerings
//! - Missing owner identity
//! - Single-zone passes (home == destination)
//! - Malformed rows and empty input
//!
//! Each test is run twice: once with the synchronous strategy and once
//! with the async strategy.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::collections::HashSet;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::NamedTempFile;
    use transit_pass_engine::catalog::PassCatalog;
    use transit_pass_engine::cli::StrategyType;
    use transit_pass_engine::strategy::create_strategy;

    /// Load the repository's default catalog configuration
    fn load_catalog() -> Arc<PassCatalog> {
        let catalog = PassCatalog::load(
            Path::new("config/offerings.csv"),
            Path::new("config/stations.csv"),
        )
        .expect("default catalog should load");
        Arc::new(catalog)
    }

    /// Blank the secret column after asserting every secret is a
    /// well-formed, unique UUID
    ///
    /// Output rows have nine comma-separated fields and none of the
    /// other fields contain commas, so a plain split is safe here.
    fn normalize_output(output: &str) -> String {
        let mut lines = output.lines();
        let header = lines.next().unwrap_or_default().to_string();

        let mut seen_secrets = HashSet::new();
        let mut normalized = vec![header];
        for line in lines {
            let mut fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 9, "unexpected field count in row: {}", line);

            let secret = fields[7];
            assert_eq!(secret.len(), 36, "secret should be a hyphenated UUID: {}", secret);
            assert_eq!(
                secret.bytes().filter(|b| *b == b'-').count(),
                4,
                "secret should be a hyphenated UUID: {}",
                secret
            );
            assert!(
                seen_secrets.insert(secret.to_string()),
                "duplicate secret in output: {}",
                secret
            );

            fields[7] = "";
            normalized.push(fields.join(","));
        }

        normalized.join("\n") + "\n"
    }

    /// Run a test fixture and compare normalized output with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - A secret is malformed or duplicated
    /// - Output doesn't match expected (after normalization)
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType) {
        // Construct paths to fixture files
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        // Verify fixture files exist
        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        // Create processing strategy
        let strategy = create_strategy(strategy_type.clone(), load_catalog(), None);

        // Create temporary output file
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        // Process all purchase requests using the selected strategy
        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process purchases: {}", e));

        // Flush output
        temp_output.flush().expect("Failed to flush temp file");

        // Read actual output from temp file
        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        // Read expected output
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        let normalized_output = normalize_output(&actual_output);
        assert_eq!(
            normalized_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output (secrets blanked):\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, normalized_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both processing strategies
    #[rstest]
    #[case("happy_path")]
    #[case("multiple_passes_same_owner")]
    #[case("invalid_instruments")]
    #[case("unknown_station")]
    #[case("unknown_offering")]
    #[case("missing_identity")]
    #[case("single_zone")]
    #[case("malformed_data")]
    #[case("empty_input")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy);
    }
}
