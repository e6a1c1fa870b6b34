use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use research_assistant::services::ReportWriter;
use research_assistant::{logger, Config, ResearchAgent, WorkflowState};
use tracing::{error, info};

/// 默认显示的引用数量
const CITATION_PREVIEW: usize = 5;

/// 研究助手：检索证据、逐条摘要打分、生成报告
#[derive(Parser, Debug)]
#[command(name = "research-assistant", version)]
struct Cli {
    /// 研究主题或问题
    topic: String,

    /// 作为文档上下文的纯文本文件
    #[arg(long, value_name = "PATH")]
    context_file: Option<PathBuf>,

    /// TOML 配置文件（环境变量会覆盖其中的值）
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 把详细报告写入文件
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// 以 JSON 输出最终状态
    #[arg(long)]
    json: bool,

    /// 显示全部引用
    #[arg(long)]
    all_citations: bool,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ 研究失败: {:#}", e);
            eprintln!("An error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 加载配置
    let config = Config::load(cli.config.as_deref()).context("加载配置失败")?;

    // 初始化日志
    logger::init(cli.verbose || config.verbose_logging);

    let pdf_text = match &cli.context_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取上下文文件: {}", path.display()))?,
        None => String::new(),
    };

    let agent = ResearchAgent::from_config(&config)?;
    let state = agent.run(&cli.topic, &pdf_text).await?;

    if let Some(path) = cli.output {
        let writer = ReportWriter::with_path(path);
        writer.write(&state).await?;
        info!("报告已保存至: {}", writer.path().display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_state(&state, cli.all_citations);
    }

    Ok(())
}

fn print_state(state: &WorkflowState, all_citations: bool) {
    let summary = state.summary.as_deref().unwrap_or("No summary generated.");
    let report = state.report.as_deref().unwrap_or("No report available.");

    println!("## Executive Summary\n\n{}\n", summary);

    if summary != report {
        println!("## Detailed Report\n\n{}\n", report);
    }

    println!("## Citations\n");
    let citations = state.citations();
    let shown = if all_citations {
        citations.len()
    } else {
        citations.len().min(CITATION_PREVIEW)
    };
    for url in &citations[..shown] {
        println!("- {}", url);
    }
    if shown < citations.len() {
        println!("Showing {} of {} citations", shown, citations.len());
    }

    println!("\n## Confidence Scores\n");
    for (i, score) in state.confidence_scores().iter().enumerate() {
        println!("Summary {} — Confidence: {:.1}%", i + 1, score);
    }
}
