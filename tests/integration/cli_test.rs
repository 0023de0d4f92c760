//! Integration tests for the csvnorm binary

#[cfg(test)]
mod cli_tests {
    use std::fs::{self, File};
    use std::io::Write;
    use std::process::Command;
    use tempfile::tempdir;

    fn run_csvnorm(args: &[&str]) -> std::process::Output {
        let mut cmd = Command::new("cargo");
        cmd.args(["run", "--bin", "csvnorm", "--"])
            .args(args)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());

        cmd.output().expect("Failed to run csvnorm")
    }

    #[test]
    fn test_file_normalization_creates_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let mut f = File::create(&input).unwrap();
        write!(f, "a, b ,\"c,d\"\n").unwrap();

        let output = dir.path().join("out.csv");
        let result = run_csvnorm(&[
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--quiet",
        ]);

        assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
        let contents = fs::read_to_string(output).unwrap();
        assert_eq!(contents, "\"a\",\"b\",\"c,d\"\n");
    }

    #[test]
    fn test_validate_only_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        let mut f = File::create(&input).unwrap();
        write!(f, "good,row\nbad\"cell\n").unwrap();

        let result = run_csvnorm(&[input.to_str().unwrap(), "--validate-only"]);
        assert!(!result.status.success());

        let stderr = String::from_utf8_lossy(&result.stderr);
        assert!(
            stderr.contains("line 2"),
            "expected location in stderr: {}",
            stderr
        );
    }
}
