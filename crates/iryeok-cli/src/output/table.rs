use iryeok_core::corpus::schema::HeaderCorpus;
use iryeok_core::model::ResumeRecord;
use iryeok_core::photo::EmbeddedImage;
use std::fmt::Write;

const DASH: &str = "-";

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(DASH)
}

/// Human-readable summary of a parsed record.
pub fn format_record(record: &ResumeRecord) -> String {
    let mut out = String::new();
    let info = &record.basic_info;

    let _ = writeln!(out, "=== Basic info ===\n");
    let age = info.age.map(|a| a.to_string());
    let residence = info.residence.map(|r| r.to_string());
    let rows: [(&str, &str); 12] = [
        ("Name", opt(&info.name)),
        ("Gender", opt(&info.gender)),
        ("Birth year", opt(&info.birth_year)),
        ("Age", opt(&age)),
        ("Email", opt(&info.email)),
        ("Phone", opt(&info.phone)),
        ("Address", opt(&info.address)),
        ("Residence", opt(&residence)),
        ("Applied for", opt(&info.application_field)),
        ("Total career", opt(&info.total_career)),
        ("Desired salary", opt(&info.desired_salary)),
        ("Last salary", opt(&info.last_salary)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<16}{}", label, value);
    }

    if !record.skills.is_empty() {
        let _ = writeln!(out, "\n=== Skills ===\n");
        let _ = writeln!(out, "  {}", record.skills.join(", "));
    }

    if !record.careers.is_empty() {
        let _ = writeln!(out, "\n=== Careers ===\n");
        for c in &record.careers {
            let _ = writeln!(
                out,
                "  {} ~ {:<8} {}  {}",
                c.start_date, c.end_date, c.company, c.role
            );
            if let Some(ref salary) = c.salary {
                let _ = writeln!(out, "    salary: {}", salary);
            }
            if !c.description.is_empty() {
                let _ = writeln!(out, "    {}", c.description);
            }
        }
    }

    if !record.education.is_empty() {
        let _ = writeln!(out, "\n=== Education ===\n");
        for e in &record.education {
            let gpa = e.gpa.map(|g| g.to_string()).unwrap_or_else(|| DASH.to_string());
            let _ = writeln!(
                out,
                "  {} ~ {:<8} {}  {}  {}  GPA {}",
                e.start_date, e.end_date, e.school, e.major, e.degree, gpa
            );
        }
    }

    if !record.certifications.is_empty() {
        let _ = writeln!(out, "\n=== Certifications ===\n");
        for c in &record.certifications {
            let _ = writeln!(
                out,
                "  {:<10} {}  {}  {}",
                c.date,
                c.name,
                opt(&c.grade),
                opt(&c.issuer)
            );
            if let Some(ref detail) = c.detail {
                let _ = writeln!(out, "    {}", detail);
            }
        }
    }

    let pref = &record.employment_preference;
    if !pref.is_empty() {
        let _ = writeln!(out, "\n=== Military service ===\n");
        let _ = writeln!(
            out,
            "  {}  {}  {}",
            opt(&pref.military_status),
            opt(&pref.military_detail),
            opt(&pref.military_period)
        );
    }

    if !record.portfolio.is_empty() {
        let _ = writeln!(out, "\n=== Portfolio ===\n");
        for file in &record.portfolio {
            let _ = writeln!(out, "  {}", file);
        }
    }

    if let Some(ref photo) = record.profile_photo_filename {
        let _ = writeln!(out, "\nProfile photo: {}", photo);
    }

    let intro_chars = record.self_introduction.chars().count();
    let detail_chars = record
        .career_detail_content
        .as_ref()
        .map(|s| s.chars().count())
        .unwrap_or(0);
    let _ = write!(
        out,
        "\nSelf-introduction: {} characters, career detail: {} characters",
        intro_chars, detail_chars
    );

    out
}

/// Embedded images, marking those that match the photo footprint.
pub fn format_images(images: &[EmbeddedImage], footprint: (u32, u32)) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:>6}  {:>11}  {:<11} {:<11} {}",
        "Object", "Size", "Filter", "Colors", "Bits"
    );
    let _ = writeln!(out, "  {}", "-".repeat(52));
    for image in images {
        let marker = if (image.width, image.height) == footprint {
            "  <- profile photo"
        } else {
            ""
        };
        let size = format!("{}x{}", image.width, image.height);
        let _ = writeln!(
            out,
            "  {:>6}  {:>11}  {:<11} {:<11} {}{}",
            image.object_id,
            size,
            image.filter,
            image.color_space,
            image.bits_per_component,
            marker
        );
    }
    let _ = write!(out, "\n{} image(s)", images.len());
    out
}

pub fn format_corpus(corpus: &HeaderCorpus) -> String {
    let mut out = String::new();
    let width = corpus
        .candidates
        .iter()
        .map(|c| c.text.chars().count())
        .max()
        .unwrap_or(10)
        .max(6);

    let _ = writeln!(out, "  {:<width$}  Trailing blank lines", "Header", width = width);
    let _ = writeln!(out, "  {}", "-".repeat(width + 22));
    for c in &corpus.candidates {
        let pad = width.saturating_sub(c.text.chars().count());
        let _ = writeln!(
            out,
            "  {}{}  {}",
            c.text,
            " ".repeat(pad),
            c.trailing_min_empty_lines
        );
    }
    let _ = write!(out, "\n{} header(s)", corpus.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use iryeok_core::corpus::schema::HeaderCandidate;
    use iryeok_core::model::{BasicInfo, CareerEntry};

    #[test]
    fn test_record_table() {
        let record = ResumeRecord {
            basic_info: BasicInfo {
                name: Some("홍길동".into()),
                ..Default::default()
            },
            careers: vec![CareerEntry {
                start_date: "2018.01".into(),
                end_date: "재직중".into(),
                company: "ACME".into(),
                role: "백엔드개발".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let table = format_record(&record);
        assert!(table.contains("Name            홍길동"));
        assert!(table.contains("Email           -"));
        assert!(table.contains("=== Careers ==="));
        assert!(!table.contains("=== Education ==="));
    }

    #[test]
    fn test_images_mark_footprint() {
        let images = vec![EmbeddedImage {
            object_id: 7,
            width: 120,
            height: 160,
            filter: "DCTDecode".into(),
            color_space: "DeviceRGB".into(),
            bits_per_component: 8,
        }];
        let table = format_images(&images, (120, 160));
        assert!(table.contains("120x160"));
        assert!(table.contains("<- profile photo"));
    }

    #[test]
    fn test_corpus_table() {
        let corpus = HeaderCorpus::new(vec![HeaderCandidate::new("학력", 2)]);
        let table = format_corpus(&corpus);
        assert!(table.contains("학력"));
        assert!(table.ends_with("1 header(s)"));
    }
}
