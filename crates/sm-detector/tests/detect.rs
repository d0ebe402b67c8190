//! End-to-end detection tests against real temp directories.

use camino::{Utf8Path, Utf8PathBuf};
use sm_core::{Framework, Language, Platform, TestType};
use sm_detector::{DetectError, Detector, DetectorConfig};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn detector(dir: &TempDir) -> Detector {
    let root = Utf8Path::from_path(dir.path()).unwrap();
    Detector::new(DetectorConfig::new(root)).unwrap()
}

#[test]
fn percy_cypress_project_resolves_full_triple() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "package.json",
        r#"{
  "name": "shop-frontend",
  "devDependencies": {
    "@percy/cypress": "^3.1.2",
    "cypress": "^13.6.0"
  }
}"#,
    );
    write_file(&dir, ".percy.yml", "version: 2\nsnapshot:\n  widths: [1280]\n");
    write_file(
        &dir,
        "cypress/e2e/checkout.cy.js",
        "describe('checkout', () => {\n  it('renders', () => {\n    cy.visit('/checkout');\n    cy.percySnapshot('checkout');\n  });\n});\n",
    );
    write_file(
        &dir,
        ".github/workflows/visual.yml",
        "on: push\njobs:\n  visual:\n    runs-on: ubuntu-latest\n",
    );

    let result = detector(&dir).detect().unwrap();
    assert_eq!(result.platform, Platform::Percy);
    assert_eq!(result.framework, Framework::Cypress);
    assert_eq!(result.language, Language::JsTs);
    assert_eq!(result.test_type, TestType::E2e);

    assert_eq!(result.files.config, vec![Utf8PathBuf::from(".percy.yml")]);
    assert_eq!(
        result.files.source,
        vec![Utf8PathBuf::from("cypress/e2e/checkout.cy.js")]
    );
    assert_eq!(
        result.files.ci,
        vec![Utf8PathBuf::from(".github/workflows/visual.yml")]
    );
    assert_eq!(
        result.files.package_manager,
        vec![Utf8PathBuf::from("package.json")]
    );
}

#[test]
fn conflicting_dependencies_in_one_manifest_are_fatal() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "package.json",
        r#"{"dependencies": {"@percy/cypress": "3.0.0", "@applitools/eyes-cypress": "3.40.0"}}"#,
    );

    let err = detector(&dir).detect().unwrap_err();
    match err {
        DetectError::MultiplePlatforms { platforms } => {
            assert_eq!(platforms.len(), 2);
            assert!(platforms.contains(&Platform::Percy));
            assert!(platforms.contains(&Platform::Applitools));
        }
        other => panic!("expected MultiplePlatforms, got {other:?}"),
    }
}

#[test]
fn empty_project_is_platform_not_detected() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "src/index.js", "export default function app() {}\n");
    write_file(&dir, "package.json", r#"{"dependencies": {"react": "18.2.0"}}"#);

    let err = detector(&dir).detect().unwrap_err();
    assert!(matches!(err, DetectError::PlatformNotDetected));
    assert!(err.is_detection_failure());
}

#[test]
fn detection_is_idempotent_and_deterministic() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "requirements.txt",
        "selenium>=4\npercy-selenium==2.0.1\n",
    );
    write_file(
        &dir,
        "tests/test_home.py",
        "def test_home(driver):\n    driver.find_element('id', 'main')\n    percy_screenshot(driver, 'home')\n",
    );
    write_file(
        &dir,
        "tests/test_login.py",
        "def test_login(driver):\n    percy_screenshot(driver, 'login')\n",
    );

    let detector = detector(&dir);
    let first = detector.detect().unwrap();
    let second = detector.detect().unwrap();
    assert_eq!(first, second);

    assert_eq!(first.platform, Platform::Percy);
    assert_eq!(first.framework, Framework::Selenium);
    assert_eq!(first.language, Language::Python);
    // File buckets come back sorted
    assert_eq!(
        first.files.source,
        vec![
            Utf8PathBuf::from("tests/test_home.py"),
            Utf8PathBuf::from("tests/test_login.py"),
        ]
    );
}

#[test]
fn cold_scan_detects_applitools_from_content_alone() {
    let dir = TempDir::new().unwrap();
    // No manifest, no config file: content is the only evidence
    write_file(
        &dir,
        "tests/visual.spec.ts",
        "eyes.open(driver, 'app', 'visual');\neyes.check('home');\neyes.close();\n",
    );

    let result = detector(&dir).detect().unwrap();
    assert_eq!(result.platform, Platform::Applitools);
    assert_eq!(
        result.files.source,
        vec![Utf8PathBuf::from("tests/visual.spec.ts")]
    );
}

#[test]
fn cold_scan_source_bucket_only_holds_winning_platform_files() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "a.spec.js",
        "percySnapshot('home');\npercySnapshot('cart');\n",
    );
    write_file(&dir, "b.spec.js", "eyes.check('home');\n");

    let result = detector(&dir).detect().unwrap();
    assert_eq!(result.platform, Platform::Percy);
    assert_eq!(result.files.source, vec![Utf8PathBuf::from("a.spec.js")]);
}

#[test]
fn configured_source_extensions_steer_the_scan() {
    let dir = TempDir::new().unwrap();
    // The only evidence lives in an extension outside the default list
    write_file(&dir, "visual.mjs", "percySnapshot('home');\n");

    let err = detector(&dir).detect().unwrap_err();
    assert!(matches!(err, DetectError::PlatformNotDetected));

    let root = Utf8Path::from_path(dir.path()).unwrap();
    let config = DetectorConfig::new(root).with_source_extensions(&["mjs".to_owned()]);
    let result = Detector::new(config).unwrap().detect().unwrap();
    assert_eq!(result.platform, Platform::Percy);
    assert_eq!(result.files.source, vec![Utf8PathBuf::from("visual.mjs")]);
}

#[test]
fn weighted_scoring_prefers_cypress_over_generic_runner_calls() {
    let dir = TempDir::new().unwrap();
    // Base Sauce client pins no framework, so the classifier decides
    write_file(
        &dir,
        "package.json",
        r#"{"devDependencies": {"@saucelabs/visual": "0.8.0"}}"#,
    );
    write_file(
        &dir,
        "e2e/journey.cy.js",
        "it('walks the happy path', () => {\n  cy.visit('/');\n  cy.visit('/products');\n  cy.visit('/cart');\n  cy.visit('/checkout');\n  cy.visit('/done');\n  test('noop', () => {});\n  sauceVisualCheck('journey');\n});\n",
    );

    let result = detector(&dir).detect().unwrap();
    assert_eq!(result.platform, Platform::SauceLabsVisual);
    assert_eq!(result.framework, Framework::Cypress);
}

#[test]
fn noise_directories_never_contribute_evidence() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "node_modules/@percy/cypress/index.js",
        "module.exports.percySnapshot = () => {};\n",
    );
    write_file(&dir, "dist/tests.bundle.js", "percySnapshot('built');\n");
    write_file(&dir, "coverage/report.js", "eyes.check('covered');\n");
    write_file(&dir, "src/app.js", "export const app = () => {};\n");

    let err = detector(&dir).detect().unwrap_err();
    assert!(matches!(err, DetectError::PlatformNotDetected));
}

#[test]
fn config_file_anchor_widens_search_and_classifies() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "applitools.config.js", "module.exports = { appName: 'shop' };\n");
    write_file(
        &dir,
        "tests/home.spec.ts",
        "import { Eyes } from '@applitools/eyes-playwright';\ntest('home', async ({ page }) => {\n  await page.goto('/');\n  await eyes.check('home');\n});\n",
    );

    let result = detector(&dir).detect().unwrap();
    assert_eq!(result.platform, Platform::Applitools);
    assert_eq!(result.framework, Framework::Playwright);
    assert_eq!(result.language, Language::JsTs);
    assert_eq!(
        result.files.config,
        vec![Utf8PathBuf::from("applitools.config.js")]
    );
}

#[test]
fn maven_project_resolves_java_triple() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "pom.xml",
        r"<project>
  <dependencies>
    <dependency>
      <groupId>io.percy</groupId>
      <artifactId>percy-java-selenium</artifactId>
      <version>1.2.0</version>
    </dependency>
  </dependencies>
</project>",
    );
    write_file(
        &dir,
        "src/test/java/VisualTest.java",
        "public class VisualTest {\n    void run(WebDriver driver) {\n        percy.percyScreenshot(driver, \"home\");\n    }\n}\n",
    );

    let result = detector(&dir).detect().unwrap();
    assert_eq!(result.platform, Platform::Percy);
    assert_eq!(result.framework, Framework::Selenium);
    assert_eq!(result.language, Language::Java);
    assert_eq!(
        result.files.package_manager,
        vec![Utf8PathBuf::from("pom.xml")]
    );
}

#[test]
fn cross_manifest_platform_conflict_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "package.json",
        r#"{"devDependencies": {"@saucelabs/visual-playwright": "0.3.0"}}"#,
    );
    write_file(&dir, "requirements.txt", "percy-playwright>=1\n");

    let err = detector(&dir).detect().unwrap_err();
    assert!(matches!(err, DetectError::MultiplePlatforms { .. }));
}

#[test]
fn stats_reflect_the_scan() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "package.json",
        r#"{"devDependencies": {"@percy/playwright": "1.0.5"}}"#,
    );
    write_file(&dir, "tests/a.spec.ts", "await percySnapshot(page, 'a');\n");
    write_file(&dir, "tests/b.spec.ts", "export const helper = 1;\n");

    let detector = detector(&dir);
    detector.detect().unwrap();

    let stats = detector.stats();
    assert_eq!(stats.manifests, 1);
    assert_eq!(stats.scanned, 2);
    assert_eq!(stats.matched, 1);
    assert_eq!(stats.read_errors, 0);
    assert!((stats.match_rate() - 50.0).abs() < f64::EPSILON);
}

#[test]
fn robot_framework_suite_via_pip_anchor() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "requirements.txt", "eyes-robotframework>=6.0\n");
    write_file(
        &dir,
        "suites/login.robot",
        "*** Settings ***\nLibrary    EyesLibrary\n\n*** Test Cases ***\nLogin Page Looks Right\n    Eyes Open    app\n    Eyes Check    login\n",
    );

    let result = detector(&dir).detect().unwrap();
    assert_eq!(result.platform, Platform::Applitools);
    assert_eq!(result.framework, Framework::RobotFramework);
    assert_eq!(result.language, Language::Python);
    assert_eq!(result.test_type, TestType::E2e);
    assert_eq!(
        result.files.source,
        vec![Utf8PathBuf::from("suites/login.robot")]
    );
}
