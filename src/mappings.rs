//! Fixed vocabularies used to translate the Olist export into Portuguese.
//!
//! Every table is a static `(source, target)` slice. Lookups fall back to the
//! key itself, so a value missing from a table passes through unchanged.

/// Tables expected in the Olist database, in display order.
///
/// `olist_sellers_datase` is kept exactly as it appears in the source data.
pub const ALLOWED_TABLES: &[&str] = &[
    "olist_customers_dataset",
    "olist_geolocation_dataset",
    "olist_order_items_dataset",
    "olist_order_payments_dataset",
    "olist_order_reviews_dataset",
    "olist_orders_dataset",
    "olist_products_dataset",
    "olist_sellers_datase",
];

/// English column name -> Portuguese column name.
pub const RENAME_MAP: &[(&str, &str)] = &[
    ("order_status", "status_pedido"),
    ("order_purchase_timestamp", "data_compra_pedido"),
    ("order_approved_at", "data_aprovacao_pedido"),
    ("order_delivered_carrier_date", "data_envio_transportadora"),
    ("order_delivered_customer_date", "data_entrega_cliente"),
    ("order_estimated_delivery_date", "data_estimada_entrega"),
    ("customer_zip_code_prefix", "cep_cliente_prefixo"),
    ("customer_city", "cidade_cliente"),
    ("customer_state", "estado_cliente"),
    ("order_item_id", "id_item_pedido"),
    ("shipping_limit_date", "data_limite_envio"),
    ("price", "preco"),
    ("freight_value", "valor_frete"),
    ("product_category_name", "categoria_produto"),
    ("product_name_lenght", "tamanho_nome_produto"),
    ("product_description_lenght", "tamanho_descricao_produto"),
    ("product_photos_qty", "qtd_fotos_produto"),
    ("product_weight_g", "peso_produto_g"),
    ("product_length_cm", "comprimento_produto_cm"),
    ("product_height_cm", "altura_produto_cm"),
    ("product_width_cm", "largura_produto_cm"),
    ("seller_zip_code_prefix", "cep_vendedor_prefixo"),
    ("seller_city", "cidade_vendedor"),
    ("seller_state", "estado_vendedor"),
    ("total_payment", "pagamento_total"),
    ("max_installments", "max_parcelas"),
    ("payment_type", "tipo_pagamento"),
    ("review_score", "nota_avaliacao"),
    ("review_comment", "comentario_avaliacao"),
    ("customer_lat", "cliente_lat"),
    ("customer_lng", "cliente_lng"),
    ("seller_lat", "vendedor_lat"),
    ("seller_lng", "vendedor_lng"),
];

/// Order status vocabulary.
pub const STATUS_MAP: &[(&str, &str)] = &[
    ("approved", "aprovado"),
    ("canceled", "cancelado"),
    ("created", "criado"),
    ("delivered", "entregue"),
    ("invoiced", "faturado"),
    ("processing", "processando"),
    ("shipped", "enviado"),
    ("unavailable", "indisponivel"),
];

/// Payment method vocabulary.
pub const PAYMENT_TYPE_MAP: &[(&str, &str)] = &[
    ("boleto", "boleto"),
    ("credit_card", "cartao_credito"),
    ("debit_card", "cartao_debito"),
    ("not_defined", "nao_definido"),
    ("voucher", "voucher"),
];

pub const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "marco",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

pub const UNKNOWN_MONTH: &str = "desconhecido";

/// Returns the mapped value for `key`, or `key` itself when it is not mapped.
pub fn lookup_or_default<'a>(map: &[(&'a str, &'a str)], key: &'a str) -> &'a str {
    map.iter()
        .find(|(source, _)| *source == key)
        .map_or(key, |(_, target)| *target)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => UNKNOWN_MONTH,
    }
}
