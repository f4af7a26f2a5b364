use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use crate::config::mask;

pub fn handle_check_config(ctx: &CommandContext) -> Result<()> {
    let config = &ctx.config;

    println!("{}", "School".bold());
    println!("  SCHOOL_ID:     {}", config.school.school_id);
    println!("  GRADE:         {}", config.school.grade);
    println!("  SERVING_LINE:  {}", config.school.serving_line);
    println!("  MEAL_TYPE:     {}", config.school.meal_type);

    println!("{}", "Menu API".bold());
    println!("  URL:           {}", config.api.base_url);
    println!("  Timeout:       {}s", config.api.timeout.as_secs());
    println!(
        "  PreK lookup:   grade {}, {}",
        config.api.prek_grade, config.api.prek_serving_line
    );

    println!("{}", "SMTP".bold());
    println!("  Server:        {}:{}", config.smtp.server, config.smtp.port);
    println!("  Timeout:       {}s", config.smtp.timeout.as_secs());
    println!(
        "  TEST_RUN:      {}",
        if config.test_run {
            "true".yellow()
        } else {
            "false".normal()
        }
    );

    match config.mail() {
        Ok(mail) => {
            println!("{}", "Mail".bold());
            println!("  SENDER_EMAIL:  {}", mask(&mail.sender_email));
            println!("  PASSWORD:      {}", "***".dimmed());
            for recipient in mail.recipients.iter() {
                println!("  Recipient:     {}", mask(recipient));
            }
            println!("\n{}", "Configuration looks good!".green());
            Ok(())
        }
        Err(e) => {
            println!("\n{} {}", "Missing:".red(), e);
            anyhow::bail!("Email configuration incomplete: {}", e)
        }
    }
}
