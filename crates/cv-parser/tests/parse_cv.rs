use cv_parser::{
    normalize_date, parse_cv_data, parse_cv_input, validate_cv, CvInput, ExtractionSummary,
    ParseOptions, BULLET_PLACEHOLDER, PRESENT,
};

const FULL_CV: &str = r#"# Claire Martin
Lead Software Engineer
Lyon, France | claire.martin@example.com | +33 6 98 76 54 32
https://www.linkedin.com/in/clairemartin

## Summary
Engineer with 10 years of experience in payments and data platforms.

## Professional Experience

### Lead Engineer - Paylib
Jan 2021 - Present
- Led a team of 6 engineers
- Cut settlement latency by 40%

### Senior Consultant - Capgemini
2016 - 2020

Retail Client
Jan 2016 - Dec 2017
- Built the POS integration layer

Insurance Client
Jan 2018 - Dec 2020
- Automated claims intake
### Developer - Startup
2014 - 2016
- Shipped the first mobile app

## Education

### MSc Computer Science - INSA Lyon
2012 - 2014
- Thesis on distributed consensus

## Skills
**Languages:** Rust, Go, SQL
**Cloud:** AWS, Kubernetes
- rust

## Certifications
- CKA - CNCF (2021)

## Languages
- French | Native
- English (C1)

## Hobbies
Climbing, chess
"#;

#[test]
fn full_document_is_parsed() {
    let cv = parse_cv_data(FULL_CV);

    let info = &cv.personal_info;
    assert_eq!(info.name.as_deref(), Some("Claire Martin"));
    assert_eq!(info.last_name.as_deref(), Some("Martin"));
    assert_eq!(info.title.as_deref(), Some("Lead Software Engineer"));
    assert_eq!(info.email.as_deref(), Some("claire.martin@example.com"));
    assert_eq!(info.location.as_deref(), Some("Lyon, France"));
    assert!(info.linkedin.as_deref().is_some_and(|l| l.contains("clairemartin")));

    assert_eq!(
        cv.summary,
        "Engineer with 10 years of experience in payments and data platforms."
    );

    let titles: Vec<&str> = cv.experience.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Lead Engineer", "Retail Client", "Insurance Client", "Developer"]
    );
    assert!(cv.experience[0].is_current);
    assert_eq!(cv.experience[1].company, "Capgemini");
    assert_eq!(cv.experience[2].start_date, "Jan 2018");
    assert_eq!(cv.experience[3].company, "Startup");
    for (i, exp) in cv.experience.iter().enumerate() {
        assert_eq!(exp.order, i);
        assert!(!exp.bullets.is_empty());
    }

    assert_eq!(cv.education.len(), 1);
    assert_eq!(cv.education[0].institution, "INSA Lyon");
    assert_eq!(cv.education[0].year, "2014");

    assert_eq!(cv.skills, vec!["Rust", "Go", "SQL", "AWS", "Kubernetes"]);
    assert_eq!(cv.certifications[0].issuer, "CNCF");
    assert_eq!(cv.certifications[0].year, "2021");
    assert_eq!(cv.languages.len(), 2);
    assert_eq!(cv.languages[1].level.as_deref(), Some("C1"));
    assert_eq!(cv.hobbies, vec!["Climbing", "chess"]);

    let report = validate_cv(&cv, None);
    assert!(report.is_valid);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn well_formed_blocks_map_one_to_one() {
    let mut doc = String::from("# Test Person\n## Experience\n");
    for i in 0..5 {
        doc.push_str(&format!("### Role {i} - Company {i}\n201{i} - 201{}\n- Task {i}\n\n", i + 1));
    }
    let cv = parse_cv_data(&doc);
    assert_eq!(cv.experience.len(), 5);
    for (i, exp) in cv.experience.iter().enumerate() {
        assert_eq!(exp.title, format!("Role {i}"));
        assert_eq!(exp.company, format!("Company {i}"));
        assert_eq!(exp.order, i);
    }
}

#[test]
fn end_to_end_example() {
    let cv = parse_cv_data(
        "# John Doe\n## Professional Experience\n### Engineer - Co\n2020 - Present\n- Did X\n### Manager - Co2\n2018 - 2020\n- Did Y",
    );
    assert_eq!(cv.experience.len(), 2);
    let first = &cv.experience[0];
    assert_eq!(first.title, "Engineer");
    assert_eq!(first.company, "Co");
    assert_eq!(first.start_date, "2020");
    assert_eq!(first.end_date, "Present");
    assert!(first.is_current);
    assert_eq!(first.bullets, vec!["Did X"]);
    assert_eq!(cv.experience[1].title, "Manager");
    assert_eq!(cv.experience[1].company, "Co2");
}

#[test]
fn headerless_experience_is_recovered() {
    let cv = parse_cv_data(
        "# Jo Bloggs\n## Experience\nSoftware Engineer at Acme Corp (2020 - 2022)\n- Built the API",
    );
    assert_eq!(cv.experience.len(), 1);
    let exp = &cv.experience[0];
    assert_eq!(exp.title, "Software Engineer");
    assert_eq!(exp.company, "Acme Corp");
    assert_eq!(exp.start_date, "2020");
    assert_eq!(exp.end_date, "2022");
}

#[test]
fn malformed_header_spacing_yields_one_block_per_marker() {
    let cv = parse_cv_data(
        "## Experience\n### A - One\n2019 - 2020\n- a\n### B - Two\n- b\n### C - Three\n2015 - 2016",
    );
    let companies: Vec<&str> = cv.experience.iter().map(|e| e.company.as_str()).collect();
    assert_eq!(companies, vec!["One", "Two", "Three"]);
    assert_eq!(cv.experience[2].bullets, vec![BULLET_PLACEHOLDER]);
}

#[test]
fn count_mismatch_is_reported_as_warning() {
    let cv = parse_cv_data("# A B\na@b.io\n## Experience\n### Engineer - Co\n2020 - 2021\n- x");
    let summary = ExtractionSummary {
        experiences_found: Some(3),
        ..Default::default()
    };
    let report = validate_cv(&cv, Some(&summary));
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert!(report.warnings.iter().any(|w| w.contains("Mismatch")));
}

#[test]
fn parsing_is_idempotent() {
    assert_eq!(parse_cv_data(FULL_CV), parse_cv_data(FULL_CV));
}

#[test]
fn date_normalization_is_idempotent_and_total() {
    let inputs = [
        "January 2020",
        "janv. 2019",
        "2021-03",
        "03/2018",
        "2017",
        "present",
        "Aujourd'hui",
        "",
        "   ",
        "not a date",
        "Q3 2020",
        "💼",
    ];
    for input in inputs {
        let once = normalize_date(input);
        assert_eq!(normalize_date(&once), once, "input: {input:?}");
    }
    assert_eq!(normalize_date("en cours"), PRESENT);
}

#[test]
fn request_input_accepts_content_field() {
    let input: CvInput =
        serde_json::from_str(r##"{"content": "# Kim Lee\n## Skills\n- Rust"}"##).unwrap();
    let cv = parse_cv_input(&input, &ParseOptions::default()).unwrap();
    assert_eq!(cv.personal_info.name.as_deref(), Some("Kim Lee"));
    assert_eq!(cv.skills, vec!["Rust"]);
}
