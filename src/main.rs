use anyhow::Result;
use clap::{Arg, Command};
use eamcet_college_finder::loader::CollegeDataLoader;
use eamcet_college_finder::models::{
    AdmissionType, Category, CollegeResult, Config, Gender, SearchFilters,
};
use eamcet_college_finder::search::{fee_range, search_colleges, unique_places};
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("eamcet-college-finder")
        .version("1.0")
        .about("Finds engineering colleges matching an EAMCET rank, category and gender")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("rank")
                .short('r')
                .long("rank")
                .value_name("RANK")
                .help("Your EAMCET rank")
                .required(true)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_name("CATEGORY")
                .help("Reservation category: OC, SC, ST, BCA, BCB, BCC, BCD, BCE or OC_EWS")
                .required(true),
        )
        .arg(
            Arg::new("gender")
                .short('g')
                .long("gender")
                .value_name("GENDER")
                .help("BOYS or GIRLS")
                .required(true),
        )
        .arg(
            Arg::new("max-fee")
                .long("max-fee")
                .value_name("FEE")
                .help("Maximum acceptable annual fee")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("college-type")
                .short('t')
                .long("college-type")
                .value_name("TYPE")
                .help("College type filter: COED, BOYS, GIRLS or ALL")
                .default_value("ALL"),
        )
        .get_matches();

    let config_file = matches.get_one::<String>("config").unwrap();

    // Load or create configuration
    let config = if Path::new(config_file).exists() {
        println!("📋 Loading configuration from: {}", config_file);
        Config::load_from_file(config_file)?
    } else {
        println!("📝 Creating default configuration file: {}", config_file);
        let default_config = Config::default();
        default_config.save_to_file(config_file)?;
        default_config
    };

    // Validate the rank before touching the dataset
    let rank = *matches.get_one::<u32>("rank").unwrap();
    let max_rank = config.max_rank.unwrap_or(200_000);
    if rank == 0 {
        println!("❌ Please enter a valid rank (greater than 0)");
        return Ok(());
    }
    if rank > max_rank {
        println!(
            "❌ Rank {} seems too high. Please check your rank (expected 1..={})",
            rank, max_rank
        );
        return Ok(());
    }

    let category_label = matches.get_one::<String>("category").unwrap();
    let category = match Category::parse(category_label) {
        Some(category) => category,
        None => {
            println!(
                "❌ Unknown category: {} (expected OC, SC, ST, BCA, BCB, BCC, BCD, BCE or OC_EWS)",
                category_label
            );
            return Ok(());
        }
    };

    let gender_label = matches.get_one::<String>("gender").unwrap();
    let gender = match Gender::parse(gender_label) {
        Some(gender) => gender,
        None => {
            println!("❌ Unknown gender: {} (expected BOYS or GIRLS)", gender_label);
            return Ok(());
        }
    };

    let type_label = matches.get_one::<String>("college-type").unwrap();
    let coed = if type_label.eq_ignore_ascii_case("ALL") {
        None
    } else {
        match AdmissionType::parse(type_label) {
            Some(admission_type) => Some(admission_type),
            None => {
                println!(
                    "❌ Unknown college type: {} (expected COED, BOYS, GIRLS or ALL)",
                    type_label
                );
                return Ok(());
            }
        }
    };

    let max_fee = matches.get_one::<f64>("max-fee").copied();

    // Load the dataset once
    let loader = CollegeDataLoader::new();
    let colleges = loader.load(&config).await?;

    if colleges.is_empty() {
        println!("❌ The college dataset is empty. Nothing to search.");
        return Ok(());
    }

    let places = unique_places(&colleges);
    let (lowest_fee, highest_fee) = fee_range(&colleges);
    println!(
        "🏫 Loaded {} cutoff records covering {} places",
        colleges.len(),
        places.len()
    );
    if highest_fee > 0.0 {
        println!("💰 Annual fees range from ₹{:.0} to ₹{:.0}", lowest_fee, highest_fee);
    }

    let filters = SearchFilters {
        rank,
        category,
        gender,
        max_fee,
        coed,
    };

    println!(
        "🔍 Searching colleges for rank {} ({} / {})",
        rank,
        category.label(),
        gender.label()
    );

    let results = search_colleges(&colleges, &filters);

    if results.is_empty() {
        println!("❌ No colleges found matching your criteria. Try adjusting your filters.");
        return Ok(());
    }

    print_summary(&results);
    print_results(&results);

    // Write reports
    let output_dir = config.output_directory.as_deref().unwrap_or("output");
    fs::create_dir_all(output_dir)?;

    let csv_name = format!("eamcet-colleges-rank-{}.csv", rank);
    generate_results_csv(&results, &Path::new(output_dir).join(&csv_name))?;
    generate_summary_report(&filters, &results, &Path::new(output_dir).join("search_summary.txt"))?;

    println!("\n✅ Search complete!");
    println!("📂 Results written to: {}/{}", output_dir, csv_name);
    println!("📄 Summary written to: {}/search_summary.txt", output_dir);
    Ok(())
}

fn print_summary(results: &[CollegeResult]) {
    let eligible = results.iter().filter(|result| result.eligible).count();
    let not_eligible = results.len() - eligible;
    let fees: Vec<f64> = results
        .iter()
        .filter_map(|result| result.college.fee)
        .filter(|fee| *fee > 0.0)
        .collect();
    let average_fee = if fees.is_empty() {
        0.0
    } else {
        fees.iter().sum::<f64>() / fees.len() as f64
    };

    println!("\n📊 SUMMARY");
    println!("==========");
    println!("🏫 Total colleges: {}", results.len());
    println!("✅ Eligible: {}", eligible);
    println!("❌ Not eligible: {}", not_eligible);
    if average_fee > 0.0 {
        println!("💰 Average fee: ₹{:.0}", average_fee);
    }
}

fn print_results(results: &[CollegeResult]) {
    const MAX_ROWS: usize = 20;

    println!("\n🎓 Colleges (eligible first, then by cutoff rank):");
    for result in results.iter().take(MAX_ROWS) {
        let cutoff = result
            .cutoff_rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let fee = result
            .college
            .fee
            .map(|fee| format!("₹{:.0}", fee))
            .unwrap_or_else(|| "N/A".to_string());
        let status = if result.eligible { "✅" } else { "❌" };

        println!(
            "   {} {} [{}] - {} | cutoff {} | {} | {}",
            status,
            result.college.name,
            result.college.inst_code,
            result.college.place,
            cutoff,
            fee,
            result.college.coed.label()
        );
    }
    if results.len() > MAX_ROWS {
        println!(
            "   ... and {} more (see the CSV report)",
            results.len() - MAX_ROWS
        );
    }
}

fn generate_results_csv(results: &[CollegeResult], csv_path: &Path) -> Result<()> {
    use csv::Writer;

    let mut writer = Writer::from_path(csv_path)?;

    writer.write_record([
        "College Name",
        "Code",
        "Location",
        "Cutoff Rank",
        "Fee",
        "Type",
        "Status",
    ])?;

    for result in results {
        writer.write_record(&[
            result.college.name.clone(),
            result.college.inst_code.clone(),
            result.college.place.clone(),
            result
                .cutoff_rank
                .map(|rank| rank.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .college
                .fee
                .map(|fee| format!("{:.0}", fee))
                .unwrap_or_else(|| "N/A".to_string()),
            result.college.coed.label().to_string(),
            if result.eligible {
                "Eligible".to_string()
            } else {
                "Not Eligible".to_string()
            },
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn generate_summary_report(
    filters: &SearchFilters,
    results: &[CollegeResult],
    report_path: &Path,
) -> Result<()> {
    let mut content = String::new();
    content.push_str(&format!("College Search Summary for rank {}\n", filters.rank));
    content.push_str("==================================\n\n");
    content.push_str(&format!("Category: {}\n", filters.category.label()));
    content.push_str(&format!("Gender: {}\n", filters.gender.label()));
    if let Some(max_fee) = filters.max_fee {
        content.push_str(&format!("Maximum fee: {:.0}\n", max_fee));
    }
    if let Some(coed) = filters.coed {
        content.push_str(&format!("College type: {}\n", coed.label()));
    }
    content.push('\n');

    let eligible: Vec<&CollegeResult> = results.iter().filter(|result| result.eligible).collect();
    if eligible.is_empty() {
        content.push_str("No colleges within reach at this rank.\n");
    } else {
        content.push_str(&format!("✅ Within reach ({} colleges):\n", eligible.len()));
        for result in &eligible {
            let cutoff = result
                .cutoff_rank
                .map(|rank| rank.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            content.push_str(&format!(
                "   - {} [{}], {} (cutoff {})\n",
                result.college.name, result.college.inst_code, result.college.place, cutoff
            ));
        }
    }

    let missed: Vec<&CollegeResult> = results.iter().filter(|result| !result.eligible).collect();
    if !missed.is_empty() {
        content.push_str(&format!("\n❌ Out of reach ({} colleges):\n", missed.len()));
        for result in &missed {
            let cutoff = result
                .cutoff_rank
                .map(|rank| rank.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            content.push_str(&format!(
                "   - {} [{}], {} (cutoff {})\n",
                result.college.name, result.college.inst_code, result.college.place, cutoff
            ));
        }
    }

    fs::write(report_path, content)?;
    Ok(())
}
