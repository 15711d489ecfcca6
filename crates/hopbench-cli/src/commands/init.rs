//! The `hopbench init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("hopbench.toml", SAMPLE_CONFIG)?;
    write_if_missing("questions.json", SAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Replace questions.json with your question file");
    println!("  2. Run: hopbench validate");
    println!("  3. Run: hopbench play");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# hopbench configuration

questions_path = "questions.json"
model_label = "Qwen-2.5-32B"
output_dir = "./hopbench-results"

[store]
type = "jsonl"
path = "./hopbench-results/sessions.jsonl"

# To send results to a collector instead:
# [store]
# type = "http"
# endpoint = "https://collector.example.com/results"
# token = "${HOPBENCH_STORE_TOKEN}"
"#;

const SAMPLE_QUESTIONS: &str = r#"[
  {
    "id": 1,
    "k_hops": 1,
    "question_and_explanation": "<Question>\n[Which city is the capital of the country where the Eiffel Tower stands?]\n</Question>\n<Options>\nLyon\nParis\nMarseille\nNice\n</Options>\n<Answer>: B",
    "correctness_qwen": "Yes",
    "response_qwen": "The Eiffel Tower is in France. The capital of France is Paris. Answer: B"
  },
  {
    "id": 2,
    "k_hops": 2,
    "question_and_explanation": "<Question>\n[In which year was the author of 'Pride and Prejudice' born?]\n</Question>\n<Options>\n1775\n1796\n1817\n1760\n</Options>\n<Answer>A</Answer>",
    "correctness_qwen": "No",
    "response_qwen": "Pride and Prejudice was written by Jane Austen. I believe she was born in 1760. Answer: D"
  },
  {
    "id": 3,
    "k_hops": 2,
    "question_and_explanation": "<Question>\n[Which ocean borders the country whose capital is Lisbon?]\n</Question>\n<Options>\nIndian\nPacific\nAtlantic\nArctic\n</Options>\n<Answer>: C",
    "correctness_qwen": "yes",
    "response_qwen": "Lisbon is the capital of Portugal. Portugal borders the Atlantic Ocean. Answer: C"
  }
]
"#;
