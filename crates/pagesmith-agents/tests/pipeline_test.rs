//! End-to-end runs of the content pipeline through the orchestrator.

use pagesmith_agents::{
  CONTENT_BLOCKS, FAQ_TEMPLATE, PARSER, PipelineOutput, PipelineResolver, QUESTION_GENERATOR,
  TemplateStep, build_pipeline, register_pipeline,
};
use pagesmith_config::RawProduct;
use pagesmith_orchestrator::{
  ChannelNotifier, ExecutionError, ExecutionEvent, NodeStatus, Orchestrator, StepError,
};
use serde_json::{Value, json};

#[test]
fn test_full_pipeline_renders_three_pages() {
  let mut orchestrator = build_pipeline().unwrap();

  let order = orchestrator.build_order().unwrap();
  assert_eq!(
    order,
    [
      "parser",
      "question_generator",
      "content_blocks",
      "faq_template",
      "product_template",
      "comparison_template"
    ]
  );

  let result = orchestrator.execute(RawProduct::sample().to_value()).unwrap();
  let output = PipelineOutput::from_result(&result, &orchestrator.status_report());

  assert_eq!(output.pages.len(), 3);
  let faq = output.page("faq").unwrap();
  assert_eq!(faq["page_type"], "faq");
  assert_eq!(faq["content"]["total_questions"], 15);
  assert_eq!(
    output.page("product_page").unwrap()["content"]["pricing"]["price"],
    "₹699"
  );
  assert_eq!(
    output.page("comparison_page").unwrap()["content"]["products"][1]["name"],
    "DermaGlow Vitamin E Serum"
  );

  let report = &output.report;
  assert!(report.workflow_completed);
  assert_eq!(report.total_nodes, 6);
  assert_eq!(report.successful_nodes, 6);
  assert_eq!(report.execution_id.as_deref(), Some(result.execution_id.as_str()));
  let summary = report.execution_summary.as_ref().unwrap();
  assert_eq!(summary.data_keys.len(), 7);
  assert_eq!(summary.execution_log.len(), 5);
}

#[test]
fn test_custom_product_flows_through() {
  let mut raw = RawProduct::sample();
  raw.insert("Product Name", "Night Repair Cream");
  raw.insert("Price", "₹1,499");

  let mut orchestrator = build_pipeline().unwrap();
  let result = orchestrator.execute(raw.to_value()).unwrap();

  let faq = result.output(FAQ_TEMPLATE).unwrap();
  assert_eq!(faq["content"]["title"], "FAQ - Night Repair Cream");

  let blocks = result.output(CONTENT_BLOCKS).unwrap();
  assert_eq!(blocks["price"]["price_category"], "Luxury");
}

#[test]
fn test_parser_failure_skips_every_downstream_node() {
  let mut raw = RawProduct::sample();
  raw.remove("Benefits");

  let mut orchestrator = build_pipeline().unwrap();
  let err = orchestrator.execute(raw.to_value()).unwrap_err();

  assert_eq!(err.node(), Some(PARSER));
  assert!(err.to_string().contains("missing product field 'Benefits'"));

  let status = orchestrator.status_report();
  assert_eq!(status.node(PARSER).unwrap().status, NodeStatus::Failed);
  assert_eq!(status.count(NodeStatus::Skipped), 5);
  assert!(orchestrator.context().unwrap().get(QUESTION_GENERATOR).unwrap().is_none());

  let output = PipelineOutput::from_orchestrator(&orchestrator);
  assert!(output.pages.is_empty());
  assert!(!output.report.workflow_completed);
  assert_eq!(output.report.successful_nodes, 0);
}

#[test]
fn test_output_before_any_run() {
  let orchestrator = build_pipeline().unwrap();

  let output = PipelineOutput::from_orchestrator(&orchestrator);

  assert!(output.pages.is_empty());
  assert_eq!(output.report.execution_id, None);
  assert_eq!(output.report.total_nodes, 6);
  assert_eq!(output.report.execution_summary, None);
}

#[test]
fn test_block_failure_does_not_fail_the_run() {
  let mut raw = RawProduct::sample();
  raw.insert("Price", "on request");

  let mut orchestrator = build_pipeline().unwrap();
  let result = orchestrator.execute(raw.to_value()).unwrap();

  let blocks = result.output(CONTENT_BLOCKS).unwrap();
  assert!(blocks["price"]["error"].as_str().unwrap().contains("no digits"));

  // Pages fall back to empty pricing rather than failing.
  let product_page = result.output("product_template").unwrap();
  assert_eq!(product_page["content"]["pricing"]["price"], "");
}

#[test]
fn test_question_failure_keeps_parser_and_block_outputs() {
  let mut orchestrator = Orchestrator::new().with_resolver(PipelineResolver);
  orchestrator
    .add_node(PARSER, pagesmith_agents::ParserStep::new(), &[])
    .unwrap();
  orchestrator
    .add_node(
      QUESTION_GENERATOR,
      |_: Value| -> Result<Value, StepError> { Err(StepError::failed("generator offline")) },
      &[PARSER],
    )
    .unwrap();
  orchestrator
    .add_node(CONTENT_BLOCKS, pagesmith_agents::ContentBlocksStep::default(), &[PARSER])
    .unwrap();
  orchestrator
    .add_node(
      FAQ_TEMPLATE,
      TemplateStep::new("faq", Default::default()),
      &[QUESTION_GENERATOR, CONTENT_BLOCKS],
    )
    .unwrap();

  let err = orchestrator.execute(RawProduct::sample().to_value()).unwrap_err();

  assert!(matches!(
    err,
    ExecutionError::NodeExecution { ref node, .. } if node == QUESTION_GENERATOR
  ));
  let status = orchestrator.status_report();
  assert_eq!(status.node(PARSER).unwrap().status, NodeStatus::Completed);
  assert_eq!(status.node(FAQ_TEMPLATE).unwrap().status, NodeStatus::Skipped);
  // Registered after the failure point but independent of it: never started.
  assert_eq!(status.node(CONTENT_BLOCKS).unwrap().status, NodeStatus::Pending);

  let parsed = orchestrator.context().unwrap().get(PARSER).unwrap().unwrap();
  assert_eq!(parsed["name"], "GlowBoost Vitamin C Serum");
}

#[test]
fn test_template_receives_assembled_data() {
  let mut orchestrator = Orchestrator::new().with_resolver(PipelineResolver);
  orchestrator
    .add_node(PARSER, pagesmith_agents::ParserStep::new(), &[])
    .unwrap();
  orchestrator
    .add_node(
      "inspect_template",
      |input: Value| -> Result<Value, StepError> { Ok(input) },
      &[PARSER],
    )
    .unwrap();

  let result = orchestrator.execute(RawProduct::sample().to_value()).unwrap();
  let data = result.output("inspect_template").unwrap();

  assert_eq!(
    data["product_info"],
    json!({
      "name": "GlowBoost Vitamin C Serum",
      "concentration": "10% Vitamin C",
      "skin_type": ["Oily", "Combination"],
      "price": "₹699",
    })
  );
  assert_eq!(data["product_a"], data["product_info"]);
  assert!(data.get("questions").is_none());
}

#[test]
fn test_pipeline_events() {
  let (notifier, mut receiver) = ChannelNotifier::channel();
  let mut orchestrator = register_pipeline(Orchestrator::with_notifier(notifier)).unwrap();

  orchestrator.execute(RawProduct::sample().to_value()).unwrap();

  let mut completed = Vec::new();
  while let Ok(event) = receiver.try_recv() {
    if let ExecutionEvent::NodeCompleted { node, .. } = event {
      completed.push(node);
    }
  }
  assert_eq!(completed.len(), 6);
  assert_eq!(completed[0], PARSER);
}
