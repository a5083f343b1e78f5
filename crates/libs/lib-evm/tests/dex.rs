mod support;

use alloy_primitives::{address, Address, B256, U256};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use lib_evm::abi::{ILimitOrder, IQuoterV2, ISwapRouter02, IERC20};
use lib_evm::dex::{self, order_id_from_receipt};
use lib_evm::{EvmError, Receipt};
use serde_json::json;
use shared::chains::{Chain, ChainKey};
use shared::dto::{OrderType, Token};
use shared::forms::limit::OrderRequest;
use shared::forms::send::SendRequest;
use shared::forms::swap::{Side, SwapRequest};
use support::*;

const DEGEN: Address = address!("0x4ed4E862860beD51a9570b96d89aF5E1B0Efefed");

fn base() -> &'static Chain {
    Chain::by_key(ChainKey::Base)
}

fn weth() -> Token {
    base().default_tokens().remove(0)
}

fn usdc() -> Token {
    base().default_tokens().remove(1)
}

fn swap_request(token_in: Token, token_out: Token, amount_in: &str, quoted_out: &str) -> SwapRequest {
    SwapRequest {
        token_in,
        token_out,
        amount_in: amount_in.to_string(),
        quoted_out: quoted_out.to_string(),
        exact: Side::From,
        slippage: 0.5,
        deadline_minutes: 30,
    }
}

fn order_created_log(limiter: Address, order_id: u64) -> serde_json::Value {
    json!([{
        "address": limiter.to_string(),
        "topics": [
            ILimitOrder::OrderCreated::SIGNATURE_HASH.to_string(),
            B256::from(U256::from(order_id)).to_string(),
            B256::left_padding_from(OWNER.as_slice()).to_string(),
        ],
        "data": "0x",
    }])
}

#[tokio::test]
async fn test_fetch_balance_native_uses_get_balance() {
    let client = client();
    client
        .provider()
        .on("eth_getBalance", json!("0xde0b6b3a7640000"));

    let balance = dex::fetch_balance(&client, base(), &weth(), OWNER).await.unwrap();
    assert_eq!(balance, "1");
    assert!(client.provider().requests("eth_call").is_empty());
}

#[tokio::test]
async fn test_fetch_balance_erc20() {
    let client = client();
    client
        .provider()
        .on_call::<IERC20::balanceOfCall>(U256::from(1_500_000u64).abi_encode());

    let balance = dex::fetch_balance(&client, base(), &usdc(), OWNER).await.unwrap();
    assert_eq!(balance, "1.5");
}

#[tokio::test]
async fn test_quote_empty_amount_skips_call() {
    let client = client();
    let quote = dex::quote_exact_input_single(&client, base(), &weth(), &usdc(), "")
        .await
        .unwrap();
    assert!(quote.is_empty());
    assert!(client.provider().requests("eth_call").is_empty());
}

#[tokio::test]
async fn test_quote_formats_with_output_decimals() {
    let client = client();
    client.provider().on_call::<IQuoterV2::quoteExactInputSingleCall>(
        (
            U256::from(2_500_123_456u64),
            U256::ZERO,
            U256::ZERO,
            U256::ZERO,
        )
            .abi_encode_params(),
    );

    let quote = dex::quote_exact_input_single(&client, base(), &weth(), &usdc(), "1")
        .await
        .unwrap();
    assert_eq!(quote, "2500.123456");

    let call = &client.provider().requests("eth_call")[0][0];
    assert_eq!(to_address(&call["to"]), base().quoter_address);
}

#[tokio::test]
async fn test_quote_failure_is_an_error() {
    let client = client();
    client
        .provider()
        .on_call_error::<IQuoterV2::quoteExactInputSingleCall>("execution reverted");
    let result = dex::quote_exact_input_single(&client, base(), &weth(), &usdc(), "1").await;
    assert!(matches!(result, Err(EvmError::Rpc { .. })));
}

#[tokio::test]
async fn test_swap_native_attaches_value_and_skips_approval() {
    let client = client();
    mine(client.provider(), tx_hash(1), json!([]));

    let request = swap_request(weth(), usdc(), "0.5", "1250");
    dex::execute_swap(&client, base(), OWNER, &request, 1_700_000_000)
        .await
        .unwrap();

    let sent = client.provider().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(to_address(&sent[0]["to"]), base().swap_router_address);
    assert_eq!(sent[0]["value"], "0x6f05b59d3b20000");
    assert_eq!(selector_of(&sent[0]), selector_hex::<ISwapRouter02::multicallCall>());
    assert!(client.provider().requests("eth_call").is_empty());
}

#[tokio::test]
async fn test_swap_erc20_approves_when_allowance_short() {
    let client = client();
    client
        .provider()
        .on_call::<IERC20::allowanceCall>(U256::ZERO.abi_encode());
    mine(client.provider(), tx_hash(2), json!([]));

    let request = swap_request(usdc(), weth(), "100", "0.04");
    dex::execute_swap(&client, base(), OWNER, &request, 1_700_000_000)
        .await
        .unwrap();

    let sent = client.provider().sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(to_address(&sent[0]["to"]), usdc().address);
    assert_eq!(selector_of(&sent[0]), selector_hex::<IERC20::approveCall>());
    assert_eq!(selector_of(&sent[1]), selector_hex::<ISwapRouter02::multicallCall>());
    assert!(sent[1].get("value").is_none());
}

#[tokio::test]
async fn test_swap_exact_output_prices_input_forward() {
    let client = client();
    client.provider().on_call::<IQuoterV2::quoteExactInputSingleCall>(
        (U256::from(2_400_000_000u64), U256::ZERO, U256::ZERO, U256::ZERO).abi_encode_params(),
    );
    mine(client.provider(), tx_hash(4), json!([]));

    // 1 WETH was derived from a reverse quote for 2500 USDC.
    let request = SwapRequest {
        exact: Side::To,
        ..swap_request(weth(), usdc(), "1", "2500")
    };
    dex::execute_swap(&client, base(), OWNER, &request, 1_700_000_000)
        .await
        .unwrap();

    assert_eq!(client.provider().requests("eth_call").len(), 1);
    let sent = client.provider().sent();
    let multicall: ISwapRouter02::multicallCall = decode_tx(&sent[0]);
    let swap = ISwapRouter02::exactInputSingleCall::abi_decode(&multicall.data[0]).unwrap();
    assert_eq!(swap.params.amountIn, U256::from(10u64).pow(U256::from(18u64)));
    // 2400 USDC less 0.5%.
    assert_eq!(swap.params.amountOutMinimum, U256::from(2_388_000_000u64));
}

#[tokio::test]
async fn test_swap_exact_input_uses_quoted_output() {
    let client = client();
    mine(client.provider(), tx_hash(5), json!([]));

    let request = swap_request(weth(), usdc(), "1", "2500");
    dex::execute_swap(&client, base(), OWNER, &request, 0)
        .await
        .unwrap();

    assert!(client.provider().requests("eth_call").is_empty());
    let multicall: ISwapRouter02::multicallCall = decode_tx(&client.provider().sent()[0]);
    let swap = ISwapRouter02::exactInputSingleCall::abi_decode(&multicall.data[0]).unwrap();
    assert_eq!(swap.params.amountOutMinimum, U256::from(2_487_500_000u64));
}

#[tokio::test]
async fn test_swap_erc20_with_allowance_sends_once() {
    let client = client();
    client
        .provider()
        .on_call::<IERC20::allowanceCall>(U256::MAX.abi_encode());
    mine(client.provider(), tx_hash(3), json!([]));

    let request = swap_request(usdc(), weth(), "100", "0.04");
    dex::execute_swap(&client, base(), OWNER, &request, 0)
        .await
        .unwrap();
    assert_eq!(client.provider().sent().len(), 1);
}

#[tokio::test]
async fn test_send_native_is_plain_transfer() {
    let client = client();
    mine(client.provider(), tx_hash(4), json!([]));

    let request = SendRequest {
        token: weth(),
        amount: "1".into(),
        recipient: RECIPIENT,
    };
    let receipt = dex::send_token(&client, base(), OWNER, &request).await.unwrap();
    assert_eq!(receipt.transaction_hash, tx_hash(4));

    let sent = client.provider().sent();
    assert_eq!(to_address(&sent[0]["to"]), RECIPIENT);
    assert_eq!(sent[0]["value"], "0xde0b6b3a7640000");
    assert!(sent[0].get("data").is_none());
}

#[tokio::test]
async fn test_send_erc20_calls_transfer() {
    let client = client();
    mine(client.provider(), tx_hash(5), json!([]));

    let request = SendRequest {
        token: usdc(),
        amount: "2.5".into(),
        recipient: RECIPIENT,
    };
    dex::send_token(&client, base(), OWNER, &request).await.unwrap();

    let sent = client.provider().sent();
    assert_eq!(to_address(&sent[0]["to"]), usdc().address);
    assert_eq!(selector_of(&sent[0]), selector_hex::<IERC20::transferCall>());
    assert!(sent[0].get("value").is_none());
}

#[tokio::test]
async fn test_token_info() {
    let client = client();
    client
        .provider()
        .on_call::<IERC20::nameCall>("Degen".to_string().abi_encode())
        .on_call::<IERC20::symbolCall>("DEGEN".to_string().abi_encode())
        .on_call::<IERC20::decimalsCall>(U256::from(18u8).abi_encode())
        .on_call::<IERC20::balanceOfCall>(U256::from(3_000_000_000_000_000_000u64).abi_encode());

    let token = dex::token_info(&client, DEGEN, OWNER).await.unwrap();
    assert_eq!(token.symbol, "DEGEN");
    assert_eq!(token.name, "Degen");
    assert_eq!(token.decimals, 18);
    assert_eq!(token.balance, "3");
}

#[tokio::test]
async fn test_token_info_fails_for_non_token() {
    let client = client();
    client
        .provider()
        .on_call_error::<IERC20::nameCall>("execution reverted");
    assert!(dex::token_info(&client, DEGEN, OWNER).await.is_err());
}

#[tokio::test]
async fn test_create_buy_order_reads_order_id() {
    let client = client();
    let limiter = base().limiter_address.unwrap();
    mine(client.provider(), tx_hash(6), order_created_log(limiter, 7));

    let request = OrderRequest::Buy {
        token: usdc(),
        price: "2500".into(),
        eth_amount: "0.1".into(),
    };
    let id = dex::create_order(&client, base(), OWNER, &request).await.unwrap();
    assert_eq!(id, Some(7));

    let sent = client.provider().sent();
    assert_eq!(to_address(&sent[0]["to"]), limiter);
    assert_eq!(sent[0]["value"], "0x16345785d8a0000");
    assert_eq!(selector_of(&sent[0]), selector_hex::<ILimitOrder::buyOrderCall>());
}

#[tokio::test]
async fn test_create_buy_order_without_event() {
    let client = client();
    mine(client.provider(), tx_hash(7), json!([]));
    let id = dex::create_buy_order(&client, base(), OWNER, usdc().address, "1", "1")
        .await
        .unwrap();
    assert_eq!(id, None);
}

#[tokio::test]
async fn test_create_sell_order_approves_limiter() {
    let client = client();
    let limiter = base().limiter_address.unwrap();
    client
        .provider()
        .on_call::<IERC20::decimalsCall>(U256::from(6u8).abi_encode())
        .on_call::<IERC20::allowanceCall>(U256::ZERO.abi_encode());
    mine(client.provider(), tx_hash(8), order_created_log(limiter, 2));

    let id = dex::create_sell_order(&client, base(), OWNER, usdc().address, "1.01", "10")
        .await
        .unwrap();
    assert_eq!(id, Some(2));

    let sent = client.provider().sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(selector_of(&sent[0]), selector_hex::<IERC20::approveCall>());
    assert_eq!(selector_of(&sent[1]), selector_hex::<ILimitOrder::sellOrderCall>());
}

#[tokio::test]
async fn test_limit_orders_unavailable_without_contract() {
    let client = client();
    let arbitrum = Chain::by_key(ChainKey::Arbitrum);
    let result = dex::cancel_order(&client, arbitrum, OWNER, 0).await;
    assert!(matches!(result, Err(EvmError::LimitOrdersUnavailable(name)) if name == "Arbitrum"));
    assert!(client.provider().sent().is_empty());
}

#[tokio::test]
async fn test_cancel_order() {
    let client = client();
    mine(client.provider(), tx_hash(9), json!([]));
    dex::cancel_order(&client, base(), OWNER, 3).await.unwrap();
    let sent = client.provider().sent();
    assert_eq!(selector_of(&sent[0]), selector_hex::<ILimitOrder::cancelOrderCall>());
}

#[tokio::test]
async fn test_user_orders_enriched_with_metadata() {
    let client = client();
    let orders = vec![
        ILimitOrder::Order {
            odt: 0,
            tokenIn: weth().address,
            tokenOut: usdc().address,
            amountIn: U256::from(500_000_000_000_000_000u64),
            priceUSD: U256::from(2_000_000_000u64),
            user: OWNER,
            executed: false,
        },
        ILimitOrder::Order {
            odt: 1,
            tokenIn: DEGEN,
            tokenOut: weth().address,
            amountIn: U256::from(3_000_000_000_000_000_000u64),
            priceUSD: U256::from(10_000u64),
            user: OWNER,
            executed: true,
        },
        ILimitOrder::Order {
            odt: 1,
            tokenIn: DEGEN,
            tokenOut: weth().address,
            amountIn: U256::from(1_000_000_000_000_000_000u64),
            priceUSD: U256::from(20_000u64),
            user: OWNER,
            executed: false,
        },
    ];
    client
        .provider()
        .on_call::<ILimitOrder::viewMyOrdersCall>(orders.abi_encode())
        .on_call::<IERC20::symbolCall>("DEGEN".to_string().abi_encode())
        .on_call::<IERC20::decimalsCall>(U256::from(18u8).abi_encode());

    let loaded = dex::user_orders(&client, base(), OWNER).await.unwrap();
    assert_eq!(loaded.len(), 3);

    assert_eq!(loaded[0].id, 0);
    assert_eq!(loaded[0].order_type, OrderType::Buy);
    assert_eq!(loaded[0].display_amount(), "0.5 ETH");
    assert_eq!(loaded[0].display_price(), "$2000");

    assert_eq!(loaded[1].id, 1);
    assert_eq!(loaded[1].display_amount(), "3 DEGEN");
    assert_eq!(loaded[1].display_price(), "$0.01");
    assert!(!loaded[1].can_cancel());
    assert_eq!(loaded[2].id, 2);

    let calls = client.provider().requests("eth_call");
    assert_eq!(to_address(&calls[0][0]["from"]), OWNER);
    // one symbol and one decimals lookup, cached for the second sell order
    assert_eq!(calls.len(), 3);
}

#[tokio::test]
async fn test_user_orders_unknown_symbol() {
    let client = client();
    let orders = vec![ILimitOrder::Order {
        odt: 1,
        tokenIn: DEGEN,
        tokenOut: weth().address,
        amountIn: U256::from(1u64),
        priceUSD: U256::from(1u64),
        user: OWNER,
        executed: false,
    }];
    client
        .provider()
        .on_call::<ILimitOrder::viewMyOrdersCall>(orders.abi_encode())
        .on_call_error::<IERC20::symbolCall>("execution reverted");

    let loaded = dex::user_orders(&client, base(), OWNER).await.unwrap();
    assert_eq!(loaded[0].amount_symbol, "Unknown");
}

#[test]
fn test_order_id_ignores_foreign_logs() {
    let limiter = base().limiter_address.unwrap();
    let receipt: Receipt = serde_json::from_value(receipt(
        tx_hash(1),
        true,
        order_created_log(Address::repeat_byte(0x99), 5),
    ))
    .unwrap();
    assert_eq!(order_id_from_receipt(&receipt, limiter), None);
}
