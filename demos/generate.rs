use skiss::AnalysisStage;

extern crate pretty_env_logger;

const DESCRIPTION: &str = "\
1. Клиент выбирает товары на сайте
2. Добавляет товары в корзину
3. Оформляет заказ с указанием адреса доставки
4. Система проверяет наличие товаров на складе
5. Если товары есть, заказ подтверждается
6. Если товаров нет, заказ отменяется
7. Подтвержденный заказ передается в отдел логистики
8. Товары упаковываются и отправляются клиенту
9. Клиент получает товары и подтверждает доставку";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    // Generate the BPMN document, printing each analysis stage.
    let output = skiss::generate_with_progress(DESCRIPTION, |stage: AnalysisStage| {
        eprintln!("{stage}");
    })?;

    println!("{}", output.xml);

    eprintln!(
        "participants: {}",
        output.model.participants.join(", ")
    );
    eprintln!("pools: {}", output.model.pools.len());

    // The document can be inspected like any loaded BPMN file.
    let summary = skiss::inspect(&output.xml)?;
    eprintln!(
        "flow nodes: {}, sequence flows: {}",
        summary.flow_nodes, summary.sequence_flows
    );
    Ok(())
}
