//! Write two revisions of a study protocol for diff testing.
//!
//! Usage: cargo run --example create_test_pair [OUTPUT_DIR]

use docwright::{CoreProperties, Document, Result, RunFormat};
use std::path::PathBuf;

/// Results paragraph shared by both revisions; only the p-value run differs
fn add_results(doc: &mut Document, p_value: RunFormat) {
    let para = doc.add_paragraph();
    para.append_run(
        "The primary outcome measure showed significant improvement ",
        RunFormat::new(),
    );
    para.append_run("(p < 0.001)", p_value);
    para.append_run(
        " in the treatment group compared to placebo.",
        RunFormat::new(),
    );
}

fn old_version() -> Result<Document> {
    let mut doc = Document::new();
    doc.set_core_properties(
        CoreProperties::new()
            .with_title("Study Protocol Draft v1")
            .with_author("Dr. Smith"),
    );

    doc.add_heading("Introduction", 1)?;
    doc.add_text_paragraph(
        "This study examines the effects of methylphenidate on attention \
         in subjects with ADHD. The methodology was applied to all subjects \
         recruited from Cincinnati Children's Hospital.",
    );
    doc.add_text_paragraph(
        "Previous research has shown mixed results regarding stimulant \
         medication efficacy in pediatric populations.",
    );

    doc.add_heading("Methods", 1)?;
    doc.add_text_paragraph(
        "Participants were recruited between January 2023 and December 2023. \
         Inclusion criteria included a confirmed diagnosis of ADHD.",
    );
    doc.add_text_paragraph("This paragraph will be deleted in the new version.");

    doc.add_heading("Results", 1)?;
    add_results(&mut doc, RunFormat::new().bold());

    doc.add_heading("Discussion", 1)?;
    doc.add_text_paragraph(
        "These findings support the use of methylphenidate for ADHD treatment. \
         Further research is needed to determine optimal dosing.",
    );

    Ok(doc)
}

fn new_version() -> Result<Document> {
    let mut doc = Document::new();
    doc.set_core_properties(
        CoreProperties::new()
            .with_title("Study Protocol Final Draft")
            .with_author("Dr. Smith"),
    );

    doc.add_heading("Introduction", 1)?;
    doc.add_text_paragraph(
        "This study examines the effects of methylphenidate on attention \
         in participants with ADHD. The methods were applied to all participants \
         recruited from Cincinnati Children's Hospital Medical Center.",
    );
    doc.add_text_paragraph(
        "Previous research has shown mixed results regarding stimulant \
         medication efficacy in pediatric populations.",
    );

    doc.add_heading("Methods", 1)?;
    doc.add_text_paragraph(
        "Participants were recruited between January 2023 and June 2024. \
         Inclusion criteria included a confirmed DSM-5 diagnosis of ADHD.",
    );

    doc.add_heading("Results", 1)?;
    add_results(&mut doc, RunFormat::new().bold().italic());
    doc.add_text_paragraph(
        "Secondary outcomes also demonstrated improvement in executive \
         function measures (Table 2).",
    );

    doc.add_heading("Discussion", 1)?;
    doc.add_text_paragraph(
        "These findings support the use of methylphenidate for ADHD treatment \
         in pediatric populations aged 6-17. Further research is needed to \
         determine optimal dosing strategies and long-term outcomes.",
    );

    doc.add_heading("Limitations", 1)?;
    doc.add_text_paragraph(
        "This study has several limitations including sample size \
         and single-site recruitment.",
    );

    Ok(doc)
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    for (name, doc) in [("test_old.docx", old_version()?), ("test_new.docx", new_version()?)] {
        let path = out_dir.join(name);
        doc.save(&path)?;
        println!("Created: {}", path.display());
    }
    Ok(())
}
