//! Free-text interpretation command

use anyhow::Result;
use tally_core::{Database, Interpretation, InterpretationSource, Interpreter, TransactionType};

pub async fn cmd_parse(
    db: &Database,
    interpreter: &Interpreter,
    user: &str,
    text: &str,
    save: bool,
) -> Result<()> {
    if !interpreter.has_ai() {
        println!("   💡 Tip: Set OPENAI_COMPATIBLE_HOST or OPENAI_API_KEY for AI parsing");
    }

    let interpretation = interpreter.interpret(text).await?;
    print_interpretation(&interpretation);

    if save {
        let id = db.insert_transaction(user, &interpretation.draft)?;
        println!();
        println!("✅ Recorded as transaction {}", id);
    } else {
        println!();
        println!("   Re-run with --save to record this draft.");
    }

    Ok(())
}

fn print_interpretation(interpretation: &Interpretation) {
    let draft = &interpretation.draft;
    let sign = match draft.tx_type {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };
    let source = match interpretation.source {
        InterpretationSource::Ai => "AI",
        InterpretationSource::Fallback => "fallback parser",
    };

    println!();
    println!("📝 Draft Transaction");
    println!("   ─────────────────────────────");
    println!("   Amount:      {}{:.2} {}", sign, draft.amount, draft.currency);
    println!("   Type:        {}", draft.tx_type);
    println!("   Category:    {}", draft.category);
    println!("   Description: {}", draft.description);
    println!("   Date:        {}", draft.date.format("%Y-%m-%d"));
    println!("   Confidence:  {:.0}%", draft.confidence * 100.0);
    println!("   Source:      {}", source);

    if let Some(warning) = &interpretation.warning {
        println!();
        println!("   ⚠️  {}", warning);
    }
}
