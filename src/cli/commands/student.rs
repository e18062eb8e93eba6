use crate::cli::parser::{Commands, StudentCommand};
use crate::config::Config;
use crate::core::StudentLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::student::{NewStudent, Student};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::formatting::{bold, describe_status};
use crate::utils::mins2readable;
use crate::utils::table::Table;
use crate::utils::time::short_ts;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Student { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open(&cfg.database)?;

    match action {
        StudentCommand::Add {
            student_id,
            first_name,
            last_name,
            middle_name,
            course,
            year_level,
            section,
            email,
            gender,
            address,
        } => {
            let student = StudentLogic::register(
                &pool,
                NewStudent {
                    student_id: student_id.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    middle_name: middle_name.clone(),
                    address: address.clone(),
                    email: email.clone(),
                    gender: gender.clone(),
                    course: course.clone(),
                    year_level: *year_level,
                    section: section.clone(),
                    profile_image: None,
                },
            )?;
            success(format!(
                "Registered {} ({})",
                student.display_name(),
                student.student_id
            ));
        }

        StudentCommand::List => print_students(&StudentLogic::list(&pool)?),

        StudentCommand::Search { term } => print_students(&StudentLogic::search(&pool, term)?),

        StudentCommand::Show { student_id, limit } => {
            let limit = limit.unwrap_or(cfg.recent_activity_limit);
            let profile = StudentLogic::profile(&pool, student_id, limit)?;
            let s = &profile.student;

            header(format!("{} ({})", s.display_name(), s.student_id));
            println!(
                "{}    {} {}-{}",
                bold("Course:"),
                s.course,
                s.year_level,
                s.section
            );
            println!("{}     {}", bold("Email:"), colorize_optional(s.email.as_deref()));
            println!("{}    {}", bold("Gender:"), colorize_optional(s.gender.as_deref()));
            println!("{}   {}", bold("Address:"), colorize_optional(s.address.as_deref()));
            println!(
                "{}     {}",
                bold("Image:"),
                colorize_optional(s.profile_image.as_deref())
            );
            println!("{}    {}\n", bold("Visits:"), profile.total_visits);

            if profile.activities.is_empty() {
                info("No visits recorded.");
            }
            for a in &profile.activities {
                let out = a
                    .visit
                    .check_out
                    .as_ref()
                    .map(short_ts)
                    .unwrap_or_else(|| "--".to_string());
                println!(
                    "#{:<5} {} → {:<16} {:<24} {:<20} {}",
                    a.visit.id,
                    short_ts(&a.visit.check_in),
                    out,
                    a.visit.purpose,
                    describe_status(a.status),
                    mins2readable(a.duration_minutes, false)
                );
            }
        }

        StudentCommand::Image { student_id, image } => {
            StudentLogic::set_profile_image(&pool, student_id, image)?;
            success(format!("Profile image updated for {student_id}"));
        }
    }

    Ok(())
}

fn print_students(students: &[Student]) {
    if students.is_empty() {
        info("No students found.");
        return;
    }

    let mut table = Table::with_headers(&["ID", "NAME", "COURSE", "YEAR", "SECTION"]);
    for s in students {
        table.add_row(vec![
            s.student_id.clone(),
            s.display_name(),
            s.course.clone(),
            s.year_level.to_string(),
            s.section.clone(),
        ]);
    }
    print!("{}", table.render());
}
