// End-to-end: CSV exports on disk → screening report

use pbk_screening::{
    CategoryCode, DataFiles, EligibilityBin, IdComparison, ScreeningConfig, ScreeningPolicy,
    ScreeningReport, ScreeningRepository,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ROSTER: &str = "\
Full Name,PID,College,Class Level,Permanent Mailing Country Line 1
\"Doe, Ann\",100,MU,SR,US
\"Roe, Bo\",200,RE,SR,US
\"Poe, Cy\",300,MU,JR,US
\"Loe, Di\",400,WA,SR,MX
";

const RULES: &str = "\
courseid,department,coursenumber,courseletter,anyUD,classtype
1,MATH,*,*,N,MS
2,MATH,101,A,,NS
3,SPAN,*,*,N,LA
4,AP,SPAN,,,LA
5,AP,CALC,,,MS
";

const CLASSES: &str = "\
id,dept,crsnum,grade,units
100,MATH,20,A,4.0
100,MATH,101A,B,4.0
100,HUM,10,A,4.0
100,MATH,90,A,4.0
100,MATH,30,W,4.0
100,MATH,40,A,2.0
400,MATH,20,A,4.0
";

const AP_CLASSES: &str = "\
id,dept,crsnum,title,units,score
300,AP,SPAN,Spanish Language,8,5
300,AP,SPAN,Spanish Language,8,5
300,AP,CALC,Calculus AB,4,4
300,AP,ARTH,Art History,8,4
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn transfer_csv() -> String {
    let mut csv = String::from("id,dept,crsnum,title,units,grade\n");
    for i in 1..=9 {
        csv.push_str(&format!("200,CHEM,{},Chemistry {},4,A\n", i, i));
    }
    // Same course exported twice
    csv.push_str("200,CHEM,1,Chemistry 1,4,A\n");
    csv
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();
    write(path, "pbk_screening.csv", ROSTER);
    write(path, "coursecrit.csv", RULES);
    write(path, "pbk_screening_classes.csv", CLASSES);
    write(path, "pbk_screening_apclasses.csv", AP_CLASSES);
    write(path, "pbk_screening_transferclasses.csv", &transfer_csv());
    write(path, "country_codes.csv", "country_code,country_name\nUS,United States\nMX,Mexico\n");
    write(path, "college_codes.csv", "college_code,college_name\nMU,Muir\nWA,Warren\n");
    // No IB export at all
    dir
}

fn build(dir: &TempDir) -> ScreeningReport {
    let repo = ScreeningRepository::open(DataFiles::in_directory(dir.path()));
    ScreeningReport::build(&repo, &ScreeningPolicy::default())
}

#[test]
fn test_students_are_binned_in_report_order() {
    let dir = fixture();
    let report = build(&dir);

    let ids: Vec<&str> = report.students.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["100", "200", "300", "400"]);

    let bins: Vec<EligibilityBin> = report.students.iter().filter_map(|s| s.bin).collect();
    assert_eq!(
        bins,
        vec![
            EligibilityBin::DomesticNoLanguage,
            EligibilityBin::TransferHeavy,
            EligibilityBin::Remaining,
            EligibilityBin::Remaining,
        ]
    );
    assert_eq!(report.bin_counts(), [1, 1, 2]);
}

#[test]
fn test_regular_courses_are_filtered_and_classified() {
    let dir = fixture();
    let report = build(&dir);
    let ann = &report.students[0];

    let math: Vec<&str> = ann
        .classes
        .get(CategoryCode::Mathematics)
        .iter()
        .map(|c| c.number.as_str())
        .collect();
    assert_eq!(math, vec!["20"]);

    let natural: Vec<&str> = ann
        .classes
        .get(CategoryCode::NaturalSciences)
        .iter()
        .map(|c| c.number.as_str())
        .collect();
    assert_eq!(natural, vec!["101A"]);

    // HUM has no rules but always counts as Humanities
    assert_eq!(ann.classes.count(CategoryCode::Humanities), 1);
    assert_eq!(ann.classes.total_placements(), 3);
    assert_eq!(ann.college_name, "Muir");
    assert_eq!(ann.country, "United States");
}

#[test]
fn test_exam_and_transfer_credit() {
    let dir = fixture();
    let report = build(&dir);

    let bo = &report.students[1];
    assert_eq!(bo.transfer_classes.len(), 9);
    assert_eq!(bo.transfer_classes[0].number, "1");
    assert_eq!(bo.college_name, "RE");

    let cy = &report.students[2];
    assert_eq!(cy.ap_classes.count(CategoryCode::Language), 1);
    assert_eq!(cy.ap_classes.count(CategoryCode::Mathematics), 1);
    assert_eq!(cy.ap_uncategorized.len(), 1);
    assert_eq!(cy.ap_uncategorized[0].number, "ARTH");
    assert_eq!(cy.ap_uncategorized[0].grade, "P");
    assert!(cy.ib_classes.is_empty());
    assert_eq!(cy.language_course_count(), 1);

    let di = &report.students[3];
    assert_eq!(di.country, "Mexico");
    assert_eq!(di.college_name, "Warren");
}

#[test]
fn test_exports() {
    let dir = fixture();
    let report = build(&dir);

    let mut roster = Vec::new();
    report.write_roster_csv(&mut roster).unwrap();
    let roster = String::from_utf8(roster).unwrap();
    let lines: Vec<&str> = roster.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("\"Doe, Ann\",,,,100,MU"));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["students"].as_array().unwrap().len(), 4);
    assert_eq!(json["students"][1]["bin"], 2);
    assert_eq!(json["students"][2]["apUncategorized"][0]["grade"], "P");
}

#[test]
fn test_config_file_drives_the_run() {
    let dir = fixture();
    let config_path = dir.path().join("screening.toml");
    let mut config = ScreeningConfig::default();
    config.data.directory = dir.path().to_path_buf();
    config.policy.transfer_bin_threshold = 10;
    config.save_to_file(&config_path).unwrap();

    let config = ScreeningConfig::load_from_file(&config_path).unwrap();
    let repo = ScreeningRepository::open(config.data.clone());
    let report = ScreeningReport::build(&repo, &config.policy);

    // Nine transfer courses no longer reach the threshold
    assert_eq!(report.bin_counts(), [1, 0, 3]);
}

#[test]
fn test_pid_check_against_course_export() {
    let dir = fixture();
    let diff = IdComparison::from_files(
        dir.path().join("pbk_screening.csv"),
        dir.path().join("pbk_screening_classes.csv"),
    )
    .unwrap();

    let missing: Vec<&str> = diff.only_in_first.iter().map(|s| s.as_str()).collect();
    assert_eq!(missing, vec!["200", "300"]);
    assert!(diff.only_in_second.is_empty());
}
